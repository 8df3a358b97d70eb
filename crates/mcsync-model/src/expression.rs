use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw text of a lecturer-authored boolean expression.
///
/// The model only stores the text. Splitting it into terms and rewriting
/// placeholders happens in `mcsync-expr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expression {
    code: String,
}

impl Expression {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn into_code(self) -> String {
        self.code
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Expression {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
