use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Points awarded by an extra feedback, between -100 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Points(i32);

impl Points {
    pub const MIN: i32 = -100;
    pub const MAX: i32 = 100;

    pub fn new(value: i32) -> Result<Self, ModelError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ModelError::PointsOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Points {
    type Error = ModelError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Points> for i32 {
    fn from(value: Points) -> Self {
        value.0
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A result or malus percentage between 0 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Percentage(u8);

impl Percentage {
    pub fn new(value: i32) -> Result<Self, ModelError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .map(Self)
            .ok_or(ModelError::ResultOutOfRange { value })
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Percentage {
    type Error = ModelError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for i32 {
    fn from(value: Percentage) -> Self {
        i32::from(value.0)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
