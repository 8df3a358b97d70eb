use serde::{Deserialize, Serialize};

use crate::ids::OptionId;
use crate::rule::RuleType;

/// A single answer option of a multiple-choice stage.
///
/// The option's slot is implicit: its index in the owning store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    pub text: String,
    #[serde(default)]
    pub rule: RuleType,
}

impl AnswerOption {
    /// Creates an option with the default `Wrong` rule.
    pub fn new(id: OptionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            rule: RuleType::default(),
        }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: RuleType) -> Self {
        self.rule = rule;
        self
    }
}

/// Caller-provided data for a new option; identity is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewAnswerOption {
    pub text: String,
    #[serde(default)]
    pub rule: RuleType,
}

impl NewAnswerOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rule: RuleType::default(),
        }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: RuleType) -> Self {
        self.rule = rule;
        self
    }

    pub fn into_option(self, id: OptionId) -> AnswerOption {
        AnswerOption {
            id,
            text: self.text,
            rule: self.rule,
        }
    }
}
