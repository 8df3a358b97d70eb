#![deny(unsafe_code)]

use mcsync_expr::ExprError;
use mcsync_model::{ModelError, OptionId};

use crate::engine::ExpressionOrigin;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// A dependent expression no longer has one term per answer option.
    #[error("{origin} has {terms} term(s) but the stage has {options} answer option(s)")]
    InvariantViolation {
        origin: ExpressionOrigin,
        terms: usize,
        options: usize,
    },

    /// A term references a slot other than its own position.
    #[error("{origin} term {slot} references slot {found}")]
    MisnumberedSlot {
        origin: ExpressionOrigin,
        slot: usize,
        found: usize,
    },

    /// A term of a dependent expression is blank.
    #[error("{origin} term {slot} is empty")]
    EmptyTerm { origin: ExpressionOrigin, slot: usize },

    #[error("no answer option identities left to allocate")]
    IdentitiesExhausted,

    #[error("answer option {0} not found")]
    OptionNotFound(OptionId),

    #[error("answer option {0} appears more than once")]
    DuplicateOption(OptionId),

    #[error("index {index} out of bounds for {len} element(s)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// An edit was planned against a list of a different length.
    #[error("edit planned for {expected} element(s) applied to {actual}")]
    StaleEdit { expected: usize, actual: usize },

    #[error("append planned without an element to insert")]
    MissingElement,

    #[error("no feedback rule with order index {0}")]
    RuleNotFound(usize),

    #[error(transparent)]
    Expr(#[from] ExprError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
