use thiserror::Error;

/// Field-level validation failures.
///
/// These are rejected before a value reaches a stage, so they never leave
/// expression state half-updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid feedback points: {value}. Points must be between {min} and {max}")]
    PointsOutOfRange { value: i32, min: i32, max: i32 },
    #[error("invalid result: {value}. Result must be between 0 and 100")]
    ResultOutOfRange { value: i32 },
    #[error("invalid variable name: {0:?}")]
    InvalidVariableName(String),
    #[error("rule name must not be empty")]
    EmptyRuleName,
}

pub type Result<T> = std::result::Result<T, ModelError>;
