use std::slice;

use super::error::ContainerError;

/// Immutable, ordered vertex storage.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearBuffer<V> {
    items: Vec<V>,
}

impl<V: Clone> LinearBuffer<V> {
    /// Copies `items`; later changes to the source are not observed.
    pub fn create(items: &[V]) -> Self {
        Self { items: items.to_vec() }
    }
}

impl<V> From<Vec<V>> for LinearBuffer<V> {
    fn from(items: Vec<V>) -> Self {
        Self { items }
    }
}

impl<V> LinearBuffer<V> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`, or `IndexOutOfBounds`.
    pub fn get(&self, index: usize) -> Result<&V, ContainerError> {
        self.items
            .get(index)
            .ok_or(ContainerError::IndexOutOfBounds { index, len: self.items.len() })
    }

    /// Lazily yields the `count` items starting at `first`.
    ///
    /// The returned iterator can be cloned to restart the sequence.
    pub fn range(&self, first: usize, count: usize) -> Result<slice::Iter<'_, V>, ContainerError> {
        let len = self.items.len();
        let end = first
            .checked_add(count)
            .filter(|end| *end <= len)
            .ok_or(ContainerError::RangeOutOfBounds { first, count, len })?;
        Ok(self.items[first..end].iter())
    }

    pub fn iter(&self) -> slice::Iter<'_, V> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[V] {
        &self.items
    }
}

impl<'a, V> IntoIterator for &'a LinearBuffer<V> {
    type IntoIter = slice::Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
