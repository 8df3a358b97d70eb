//! Placeholder tokens embedded in expression text.
//!
//! Two token kinds are recognised:
//! - slot references `[mc=<index>]`, naming the input of the option at a slot
//! - variable references `[var=<name>]`, naming an exercise variable
//!
//! Only slot references are ever rewritten. A bracketed fragment whose payload
//! does not fit its kind (e.g. `[mc=x]`) is not a token and is left alone.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use mcsync_model::VariableName;
use mcsync_model::ids::is_identifier;
use regex::Regex;

use crate::error::{ExprError, Result};

pub const SLOT_KEY: &str = "mc";
pub const VARIABLE_KEY: &str = "var";

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?<key>mc|var)=(?<payload>[^\[\]=]+)\]").expect("token pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    Slot,
    Variable,
}

impl PlaceholderKind {
    pub fn key(self) -> &'static str {
        match self {
            PlaceholderKind::Slot => SLOT_KEY,
            PlaceholderKind::Variable => VARIABLE_KEY,
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            SLOT_KEY => Some(PlaceholderKind::Slot),
            VARIABLE_KEY => Some(PlaceholderKind::Variable),
            _ => None,
        }
    }
}

/// A decoded placeholder token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Slot(usize),
    Variable(VariableName),
}

impl Placeholder {
    pub fn kind(&self) -> PlaceholderKind {
        match self {
            Placeholder::Slot(_) => PlaceholderKind::Slot,
            Placeholder::Variable(_) => PlaceholderKind::Variable,
        }
    }

    /// Canonical token text.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decodes a complete token. Returns `None` unless all of `token` is one
    /// well-formed placeholder.
    pub fn decode(token: &str) -> Option<Self> {
        let captures = TOKEN_PATTERN.captures(token)?;
        let whole = captures.get(0)?;
        if whole.start() != 0 || whole.end() != token.len() {
            return None;
        }
        parse_payload(&captures["key"], &captures["payload"])
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::Slot(index) => write!(f, "[{SLOT_KEY}={index}]"),
            Placeholder::Variable(name) => write!(f, "[{VARIABLE_KEY}={name}]"),
        }
    }
}

fn parse_payload(key: &str, payload: &str) -> Option<Placeholder> {
    match PlaceholderKind::from_key(key)? {
        PlaceholderKind::Slot => {
            if !payload.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            payload.parse().ok().map(Placeholder::Slot)
        }
        PlaceholderKind::Variable => {
            if !is_identifier(payload) {
                return None;
            }
            VariableName::new(payload).ok().map(Placeholder::Variable)
        }
    }
}

/// Encodes a slot reference for `index`.
pub fn encode_slot(index: usize) -> String {
    Placeholder::Slot(index).encode()
}

/// Encodes a reference to the exercise variable `name`.
pub fn encode_variable(name: &VariableName) -> String {
    Placeholder::Variable(name.clone()).encode()
}

/// A token occurrence together with its byte span in the searched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    pub placeholder: Placeholder,
    pub span: Range<usize>,
}

/// Every token of `kind` in `text`, left to right.
pub fn find_all(text: &str, kind: PlaceholderKind) -> Vec<TokenMatch> {
    TOKEN_PATTERN
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let placeholder = parse_payload(&captures["key"], &captures["payload"])?;
            (placeholder.kind() == kind).then(|| TokenMatch {
                placeholder,
                span: whole.range(),
            })
        })
        .collect()
}

/// Slot indices referenced in `text`, left to right, with repetitions.
pub fn slot_indices(text: &str) -> Vec<usize> {
    find_all(text, PlaceholderKind::Slot)
        .into_iter()
        .filter_map(|m| match m.placeholder {
            Placeholder::Slot(index) => Some(index),
            Placeholder::Variable(_) => None,
        })
        .collect()
}

/// Rewrites slot references according to `mapping`.
///
/// Tokens whose index is not a key of `mapping` are kept verbatim, as is all
/// text between tokens. Fails if two distinct indices present in `text` would
/// land on the same target.
pub fn rename_slots(text: &str, mapping: &BTreeMap<usize, usize>) -> Result<String> {
    let matches = find_all(text, PlaceholderKind::Slot);
    if matches.is_empty() || mapping.is_empty() {
        return Ok(text.to_string());
    }

    let mut sources_by_target: HashMap<usize, usize> = HashMap::new();
    for m in &matches {
        let Placeholder::Slot(source) = m.placeholder else {
            continue;
        };
        if let Some(&target) = mapping.get(&source) {
            match sources_by_target.insert(target, source) {
                Some(previous) if previous != source => {
                    return Err(ExprError::AmbiguousRename {
                        target,
                        term: text.to_string(),
                    });
                }
                _ => {}
            }
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for m in matches {
        let Placeholder::Slot(source) = m.placeholder else {
            continue;
        };
        if let Some(&target) = mapping.get(&source) {
            out.push_str(&text[cursor..m.span.start]);
            out.push_str(&encode_slot(target));
            cursor = m.span.end;
        }
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Renames a single slot index; the common case for one relocated term.
pub fn rename_slot(text: &str, from: usize, to: usize) -> Result<String> {
    if from == to {
        return Ok(text.to_string());
    }
    rename_slots(text, &BTreeMap::from([(from, to)]))
}
