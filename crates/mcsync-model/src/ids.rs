#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Stable identity of an answer option.
///
/// Identities survive reordering; the option's slot is only ever its current
/// position in the owning store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct OptionId(u64);

impl OptionId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// The identity following this one, or `None` at `u64::MAX`.
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct StageId(u64);

impl StageId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage-{}", self.0)
    }
}

/// Name of an exercise variable referenced from a rule.
///
/// Follows the identifier grammar of variable placeholders: a letter or
/// underscore, then letters, digits, underscores or German umlauts.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct VariableName(String);

impl VariableName {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if !is_identifier(trimmed) {
            return Err(ModelError::InvalidVariableName(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Returns true if `value` is a legal variable identifier.
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || "äÄöÖüÜß".contains(c))
}

impl TryFrom<String> for VariableName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VariableName> for String {
    fn from(value: VariableName) -> Self {
        value.0
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-empty name of an ordered feedback rule.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct RuleName(String);

impl RuleName {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyRuleName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RuleName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RuleName> for String {
    fn from(value: RuleName) -> Self {
        value.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_names_follow_identifier_grammar() {
        assert!(VariableName::new("v1").is_ok());
        assert!(VariableName::new("_tmp").is_ok());
        assert!(VariableName::new("größe").is_ok());
        assert_eq!(VariableName::new("  x ").unwrap().as_str(), "x");
        assert!(VariableName::new("1abc").is_err());
        assert!(VariableName::new("a-b").is_err());
        assert!(VariableName::new("").is_err());
    }

    #[test]
    fn option_ids_stop_at_the_last_value() {
        assert_eq!(OptionId::new(4).next(), Some(OptionId::new(5)));
        assert_eq!(OptionId::new(u64::MAX).next(), None);
    }

    #[test]
    fn rule_names_reject_blank_values() {
        assert_eq!(RuleName::new("   "), Err(ModelError::EmptyRuleName));
        assert_eq!(RuleName::new(" Ring ").unwrap().as_str(), "Ring");
    }

    #[test]
    fn variable_name_deserialization_is_validated() {
        let ok: VariableName = serde_json::from_str("\"v2\"").unwrap();
        assert_eq!(ok.as_str(), "v2");
        assert!(serde_json::from_str::<VariableName>("\"2v\"").is_err());
    }
}
