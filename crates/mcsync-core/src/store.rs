//! Ordered, identity-stable answer options of one stage.

use serde::{Deserialize, Serialize};

use mcsync_model::{AnswerOption, NewAnswerOption, OptionId, RuleType};

use crate::error::{Result, SyncError};
use crate::permutation::EditPermutation;

/// The answer options of a stage in slot order.
///
/// The position of an option in this sequence is its slot. Structural edits
/// are planned here and carried out by the synchronization engine together
/// with the dependent expressions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerOptionStore {
    options: Vec<AnswerOption>,
    #[serde(default)]
    next_id: u64,
}

/// An edit planned against the store, ready to be synchronized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEdit {
    permutation: EditPermutation,
    inserted: Option<AnswerOption>,
}

impl PlannedEdit {
    pub fn permutation(&self) -> &EditPermutation {
        &self.permutation
    }

    /// Identity of the option an append will insert.
    pub fn inserted_id(&self) -> Option<OptionId> {
        self.inserted.as_ref().map(|option| option.id)
    }
}

impl AnswerOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn as_slice(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnswerOption> {
        self.options.iter()
    }

    pub fn get(&self, slot: usize) -> Option<&AnswerOption> {
        self.options.get(slot)
    }

    pub fn position(&self, id: OptionId) -> Option<usize> {
        self.options.iter().position(|option| option.id == id)
    }

    pub fn find(&self, id: OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.id == id)
    }

    /// Mutable access for text and rule edits. These never affect slots.
    pub fn find_mut(&mut self, id: OptionId) -> Option<&mut AnswerOption> {
        self.options.iter_mut().find(|option| option.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = OptionId> + '_ {
        self.options.iter().map(|option| option.id)
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleType> + '_ {
        self.options.iter().map(|option| &option.rule)
    }

    /// Plans appending `data` as a new last option with a fresh identity.
    pub fn plan_append(&mut self, data: NewAnswerOption) -> Result<PlannedEdit> {
        let id = self.allocate_id()?;
        Ok(PlannedEdit {
            permutation: EditPermutation::append(self.len()),
            inserted: Some(data.into_option(id)),
        })
    }

    /// Plans removing the option with identity `id`.
    pub fn plan_remove(&self, id: OptionId) -> Result<PlannedEdit> {
        let index = self.position(id).ok_or(SyncError::OptionNotFound(id))?;
        Ok(PlannedEdit {
            permutation: EditPermutation::remove(self.len(), index)?,
            inserted: None,
        })
    }

    /// Plans moving the option at slot `from` to slot `to`.
    pub fn plan_move(&self, from: usize, to: usize) -> Result<PlannedEdit> {
        Ok(PlannedEdit {
            permutation: EditPermutation::move_element(self.len(), from, to)?,
            inserted: None,
        })
    }

    /// Carries out a planned edit on the option list. Returns the removed
    /// option for removals.
    pub(crate) fn apply(&mut self, edit: PlannedEdit) -> Result<Option<AnswerOption>> {
        edit.permutation.apply(&mut self.options, edit.inserted)
    }

    /// Returns the first identity that occurs more than once.
    pub fn duplicate_id(&self) -> Option<OptionId> {
        let mut seen = std::collections::BTreeSet::new();
        self.ids().find(|id| !seen.insert(*id))
    }

    /// Returns an identity above every identity ever handed out or loaded.
    /// Nothing is reserved if the identity space is used up.
    fn allocate_id(&mut self) -> Result<OptionId> {
        let mut floor = self.next_id;
        for option in &self.options {
            let after = option.id.next().ok_or(SyncError::IdentitiesExhausted)?;
            floor = floor.max(after.get());
        }
        let id = OptionId::new(floor);
        self.next_id = id.next().ok_or(SyncError::IdentitiesExhausted)?.get();
        Ok(id)
    }
}

impl<'a> IntoIterator for &'a AnswerOptionStore {
    type Item = &'a AnswerOption;
    type IntoIter = std::slice::Iter<'a, AnswerOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
