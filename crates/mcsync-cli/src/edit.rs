//! Structural edits given on the command line.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use mcsync_core::McStage;
use mcsync_model::OptionId;

/// One `--edit` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    /// `append:<text>`
    Append(String),
    /// `remove:<option-id>`
    Remove(OptionId),
    /// `move:<from>:<to>`
    Move { from: usize, to: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditParseError {
    #[error("unknown edit `{0}` (expected append:<text>, remove:<id> or move:<from>:<to>)")]
    UnknownKind(String),
    #[error("`{value}` is not a valid {what}")]
    InvalidNumber { what: &'static str, value: String },
    #[error("move needs two slots: move:<from>:<to>")]
    MissingTarget,
}

impl EditRequest {
    /// Applies the edit to `stage` through its synchronized command methods.
    pub fn apply(&self, stage: &mut McStage) -> mcsync_core::Result<()> {
        match self {
            EditRequest::Append(text) => stage.add_answer_option(text.clone()).map(|_| ()),
            EditRequest::Remove(id) => stage.remove_option(*id).map(|_| ()),
            EditRequest::Move { from, to } => stage.move_option(*from, *to),
        }
    }
}

impl FromStr for EditRequest {
    type Err = EditParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = value
            .split_once(':')
            .ok_or_else(|| EditParseError::UnknownKind(value.to_string()))?;
        match kind {
            "append" => Ok(EditRequest::Append(rest.to_string())),
            "remove" => Ok(EditRequest::Remove(OptionId::new(parse_number(
                "option id",
                rest,
            )?))),
            "move" => {
                let (from, to) = rest.split_once(':').ok_or(EditParseError::MissingTarget)?;
                Ok(EditRequest::Move {
                    from: parse_number("slot", from)?,
                    to: parse_number("slot", to)?,
                })
            }
            _ => Err(EditParseError::UnknownKind(kind.to_string())),
        }
    }
}

impl fmt::Display for EditRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditRequest::Append(text) => write!(f, "append:{text}"),
            EditRequest::Remove(id) => write!(f, "remove:{id}"),
            EditRequest::Move { from, to } => write!(f, "move:{from}:{to}"),
        }
    }
}

fn parse_number<T: FromStr>(what: &'static str, value: &str) -> Result<T, EditParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| EditParseError::InvalidNumber {
            what,
            value: value.to_string(),
        })
}
