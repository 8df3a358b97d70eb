use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// Two distinct slot indices of one term would be renamed to the same slot.
    #[error("ambiguous rename onto slot {target} in term {term:?}")]
    AmbiguousRename { target: usize, term: String },
}

pub type Result<T> = std::result::Result<T, ExprError>;
