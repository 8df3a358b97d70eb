//! Lists whose elements carry an explicit order index.
//!
//! This is the plain counterpart of option synchronization: elements hold no
//! placeholder text, so an edit only renumbers the `order_index` fields to
//! match list positions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use mcsync_model::FeedbackRule;

use crate::error::{Result, SyncError};
use crate::permutation::EditPermutation;

/// An element positioned by an explicit order index.
pub trait OrderIndexed {
    fn order_index(&self) -> usize;
    fn set_order_index(&mut self, index: usize);
}

impl OrderIndexed for FeedbackRule {
    fn order_index(&self) -> usize {
        self.order_index
    }

    fn set_order_index(&mut self, index: usize) {
        self.order_index = index;
    }
}

/// A list kept sorted with `order_index == position` for every element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedList<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: OrderIndexed> OrderedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from elements in any order, sorting by their order index
    /// and closing gaps.
    pub fn from_unordered(mut items: Vec<T>) -> Self {
        items.sort_by_key(T::order_index);
        let mut list = Self { items };
        list.renumber();
        list
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, order_index: usize) -> Option<&T> {
        self.items.get(order_index)
    }

    pub fn get_mut(&mut self, order_index: usize) -> Option<&mut T> {
        self.items.get_mut(order_index)
    }

    /// Appends `item` and returns its order index.
    pub fn push(&mut self, item: T) -> Result<usize> {
        let permutation = EditPermutation::append(self.len());
        self.apply(&permutation, Some(item))?;
        Ok(self.len() - 1)
    }

    /// Removes the element with `order_index`.
    pub fn remove(&mut self, order_index: usize) -> Result<T> {
        let index = self
            .items
            .iter()
            .position(|item| item.order_index() == order_index)
            .ok_or(SyncError::RuleNotFound(order_index))?;
        let permutation = EditPermutation::remove(self.len(), index)?;
        self.apply(&permutation, None)?
            .ok_or(SyncError::RuleNotFound(order_index))
    }

    /// Moves the element at `from` to `to`.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        let permutation = EditPermutation::move_element(self.len(), from, to)?;
        if permutation.is_identity() {
            return Ok(());
        }
        self.apply(&permutation, None)?;
        Ok(())
    }

    fn apply(&mut self, permutation: &EditPermutation, appended: Option<T>) -> Result<Option<T>> {
        let removed = permutation.apply(&mut self.items, appended)?;
        self.renumber();
        debug!(edit = %permutation.kind(), len = self.len(), "renumbered ordered list");
        Ok(removed)
    }

    fn renumber(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.set_order_index(index);
        }
    }
}

impl<T: Serialize> Serialize for OrderedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de> + OrderIndexed> Deserialize<'de> for OrderedList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from_unordered)
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
