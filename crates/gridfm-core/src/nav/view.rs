//! The displayed listing with its cursor and marks.

use std::path::PathBuf;

use crate::fs::entry::Entry;
use crate::nav::selection::SelectionSet;

/// How each grid cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Icon, name, and size or `<DIR>` right-aligned.
    #[default]
    Detailed,
    /// Icon, name and size when known.
    Compact,
    /// Name only.
    List,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Detailed, ViewMode::Compact, ViewMode::List];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Detailed => "Detailed",
            ViewMode::Compact => "Compact",
            ViewMode::List => "List",
        }
    }

    /// Parses a config value; unknown values fall back to `Detailed`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "compact" => ViewMode::Compact,
            "list" => ViewMode::List,
            _ => ViewMode::Detailed,
        }
    }
}

/// The current view: items, marked indices and cursor as one value.
///
/// A new listing can only be installed by building a new `ItemView`, which
/// starts with an empty selection, so marks taken against an old listing
/// can never point into a new one. All transitions consume `self`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemView {
    items: Vec<Entry>,
    selection: SelectionSet,
    cursor: usize,
}

impl ItemView {
    /// A view with the cursor on the first item.
    pub fn new(items: Vec<Entry>) -> Self {
        Self::with_cursor(items, 0)
    }

    /// A view with the cursor at `cursor`, clamped to the last item.
    pub fn with_cursor(items: Vec<Entry>, cursor: usize) -> Self {
        let cursor = clamp_index(cursor, items.len());
        Self {
            items,
            selection: SelectionSet::new(),
            cursor,
        }
    }

    pub fn items(&self) -> &[Entry] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entry under the cursor.
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.items.get(self.cursor)
    }

    /// Moves the cursor, clamping to bounds. Marks are kept.
    pub fn with_cursor_at(self, index: usize) -> Self {
        let cursor = clamp_index(index, self.items.len());
        Self { cursor, ..self }
    }

    /// Flips the mark on `index`. ".." and placeholders cannot be marked.
    pub fn toggle(self, index: usize) -> Self {
        let markable = self.items.get(index).is_some_and(Entry::is_actionable);
        if !markable {
            return self;
        }
        Self {
            selection: self.selection.toggle(index),
            ..self
        }
    }

    /// Marks every markable item, or clears the marks if any exist.
    pub fn select_all(self) -> Self {
        let selection = if self.selection.is_empty() {
            SelectionSet::with_all(
                self.items
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.is_actionable())
                    .map(|(i, _)| i),
            )
        } else {
            SelectionSet::new()
        };
        Self { selection, ..self }
    }

    pub fn clear_selection(self) -> Self {
        Self {
            selection: SelectionSet::new(),
            ..self
        }
    }

    /// Paths of the marked items in listing order.
    pub fn marked_paths(&self) -> Vec<PathBuf> {
        self.selection
            .iter()
            .filter_map(|i| self.items.get(i))
            .filter(|e| e.is_actionable())
            .map(|e| e.path().to_path_buf())
            .collect()
    }

    /// What an operation should act on: the marked items, or else the
    /// cursor item if it is actionable.
    pub fn target_paths(&self) -> Vec<PathBuf> {
        if !self.selection.is_empty() {
            return self.marked_paths();
        }
        self.selected_entry()
            .filter(|e| e.is_actionable())
            .map(|e| vec![e.path().to_path_buf()])
            .unwrap_or_default()
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
