//! Index mappings produced by structural edits of an ordered list.
//!
//! Every edit is a total mapping from old positions to new positions:
//! - **Append** keeps all positions and adds one at the end
//! - **Remove(k)** drops position `k` and shifts later positions down by one
//! - **Move(from, to)** relocates one element and shifts the range in between
//!
//! The same permutation is applied to the option list and to the terms of every
//! dependent expression, which keeps the two aligned.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditKind {
    Append,
    Remove { index: usize },
    Move { from: usize, to: usize },
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditKind::Append => f.write_str("append"),
            EditKind::Remove { index } => write!(f, "remove({index})"),
            EditKind::Move { from, to } => write!(f, "move({from}, {to})"),
        }
    }
}

/// A validated edit against a list of `old_len` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditPermutation {
    kind: EditKind,
    old_len: usize,
}

impl EditPermutation {
    pub fn append(len: usize) -> Self {
        Self {
            kind: EditKind::Append,
            old_len: len,
        }
    }

    pub fn remove(len: usize, index: usize) -> Result<Self> {
        check_index(index, len)?;
        Ok(Self {
            kind: EditKind::Remove { index },
            old_len: len,
        })
    }

    pub fn move_element(len: usize, from: usize, to: usize) -> Result<Self> {
        check_index(from, len)?;
        check_index(to, len)?;
        Ok(Self {
            kind: EditKind::Move { from, to },
            old_len: len,
        })
    }

    pub fn kind(&self) -> EditKind {
        self.kind
    }

    pub fn old_len(&self) -> usize {
        self.old_len
    }

    pub fn new_len(&self) -> usize {
        match self.kind {
            EditKind::Append => self.old_len + 1,
            EditKind::Remove { .. } => self.old_len - 1,
            EditKind::Move { .. } => self.old_len,
        }
    }

    /// True if no element changes position and nothing is added or removed.
    pub fn is_identity(&self) -> bool {
        matches!(self.kind, EditKind::Move { from, to } if from == to)
    }

    /// New position of the element at `old`, or `None` if it is removed or
    /// `old` is out of range.
    pub fn new_index(&self, old: usize) -> Option<usize> {
        if old >= self.old_len {
            return None;
        }
        match self.kind {
            EditKind::Append => Some(old),
            EditKind::Remove { index } => match old.cmp(&index) {
                std::cmp::Ordering::Less => Some(old),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(old - 1),
            },
            EditKind::Move { from, to } => Some(if old == from {
                to
            } else if from < to && (from + 1..=to).contains(&old) {
                old - 1
            } else if from > to && (to..from).contains(&old) {
                old + 1
            } else {
                old
            }),
        }
    }

    /// The inverse edit for moves; `None` for appends and removals.
    pub fn inverse(&self) -> Option<Self> {
        match self.kind {
            EditKind::Move { from, to } => Some(Self {
                kind: EditKind::Move { from: to, to: from },
                old_len: self.old_len,
            }),
            EditKind::Append | EditKind::Remove { .. } => None,
        }
    }

    /// Applies the edit to `items`, which must hold exactly `old_len` elements.
    ///
    /// `appended` is the element an append inserts; other edits ignore it.
    /// Returns the removed element for removals.
    pub fn apply<T>(&self, items: &mut Vec<T>, appended: Option<T>) -> Result<Option<T>> {
        if items.len() != self.old_len {
            return Err(SyncError::StaleEdit {
                expected: self.old_len,
                actual: items.len(),
            });
        }
        match self.kind {
            EditKind::Append => {
                items.push(appended.ok_or(SyncError::MissingElement)?);
                Ok(None)
            }
            EditKind::Remove { index } => Ok(Some(items.remove(index))),
            EditKind::Move { from, to } => {
                if from != to {
                    let item = items.remove(from);
                    items.insert(to, item);
                }
                Ok(None)
            }
        }
    }
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(SyncError::IndexOutOfBounds { index, len });
    }
    Ok(())
}
