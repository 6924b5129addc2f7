//! Marked items.

use std::collections::BTreeSet;

/// Indices of marked items in the current view.
///
/// The indices are only meaningful for the listing they were taken from;
/// [`crate::nav::view::ItemView`] owns one of these next to its items so
/// the two are always replaced together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    indices: BTreeSet<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `index` if unmarked, unmarks it otherwise.
    pub fn toggle(self, index: usize) -> Self {
        let mut indices = self.indices;
        if !indices.remove(&index) {
            indices.insert(index);
        }
        Self { indices }
    }

    pub fn with_all(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Marked indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}
