//! Per-option rule tags.
//!
//! A rule decides what ticking (or not ticking) an option means when the
//! stage is graded:
//! - **Correct**: the option must be ticked
//! - **Wrong**: the option must not be ticked
//! - **NoMatter**: the option is ignored
//! - **Variable**: the option must be ticked iff the named exercise variable is true

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::VariableName;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "variable", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    Correct,
    #[default]
    Wrong,
    NoMatter,
    Variable(VariableName),
}

impl RuleType {
    /// Returns the canonical tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Correct => "CORRECT",
            RuleType::Wrong => "WRONG",
            RuleType::NoMatter => "NO_MATTER",
            RuleType::Variable(_) => "VARIABLE",
        }
    }

    pub fn variable(&self) -> Option<&VariableName> {
        match self {
            RuleType::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if the option contributes nothing to grading.
    pub fn is_neutral(&self) -> bool {
        matches!(self, RuleType::NoMatter)
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleType::Variable(name) => write!(f, "VARIABLE({name})"),
            other => f.write_str(other.as_str()),
        }
    }
}
