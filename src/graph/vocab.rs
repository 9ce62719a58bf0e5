//! String interning with dense, first-occurrence ordered IDs

use super::types::DenseId;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use std::marker::PhantomData;

/// Bidirectional `string <-> dense ID` table.
///
/// IDs are assigned in first-insertion order, are contiguous from zero and
/// never change once handed out. Lookup and insertion are amortized O(1).
#[derive(Debug, Clone)]
pub struct Vocabulary<I: DenseId> {
    entries: IndexSet<String, FxBuildHasher>,
    _id: PhantomData<I>,
}

impl<I: DenseId> Default for Vocabulary<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: DenseId> Vocabulary<I> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Vocabulary {
            entries: IndexSet::with_capacity_and_hasher(capacity, FxBuildHasher),
            _id: PhantomData,
        }
    }

    /// Intern `value`, returning its existing ID if already present
    pub fn insert(&mut self, value: &str) -> I {
        if let Some(index) = self.entries.get_index_of(value) {
            return I::from_index(index);
        }
        let (index, _) = self.entries.insert_full(value.to_string());
        I::from_index(index)
    }

    /// Like [`insert`](Self::insert), also reporting whether the value was new
    pub fn insert_new(&mut self, value: &str) -> (I, bool) {
        let before = self.entries.len();
        let id = self.insert(value);
        (id, self.entries.len() > before)
    }

    pub fn get(&self, value: &str) -> Option<I> {
        self.entries.get_index_of(value).map(I::from_index)
    }

    pub fn name(&self, id: I) -> Option<&str> {
        self.entries.get_index(id.index()).map(String::as_str)
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// IDs in assignment order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = I> + '_ {
        (0..self.entries.len()).map(I::from_index)
    }

    /// `(id, string)` pairs in assignment order
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (I, &str)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, value)| (I::from_index(index), value.as_str()))
    }

    /// Total bytes held by the interned strings themselves
    pub fn string_bytes(&self) -> usize {
        self.entries.iter().map(String::len).sum()
    }
}
