//! Immutable render snapshot.

use std::path::PathBuf;

use crate::fs::entry::Entry;
use crate::nav::grid::{ChromeLines, GridLayout};
use crate::nav::view::ViewMode;
use crate::session::dialog::Dialog;

/// One visible grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameItem {
    /// Index into the full view.
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub entry: Entry,
    pub is_cursor: bool,
    pub is_marked: bool,
}

/// Everything the renderer needs for one frame. Owned; the renderer keeps
/// no reference into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFrame {
    pub path: PathBuf,
    /// Items on the current page, column-major.
    pub page_items: Vec<FrameItem>,
    pub selected_index: usize,
    pub total_items: usize,
    pub page: usize,
    pub marked_count: usize,
    pub clipboard_summary: Option<String>,
    pub sort_summary: String,
    pub view_summary: String,
    /// Search or filter banner line.
    pub banner: Option<String>,
    pub layout_summary: String,
    pub status_message: Option<String>,
    pub layout: GridLayout,
    pub view_mode: ViewMode,
    pub show_icons: bool,
    pub chrome: ChromeLines,
    pub dialog: Option<Dialog>,
}

impl ViewFrame {
    /// The item under the cursor, if it is on this page.
    pub fn cursor_item(&self) -> Option<&FrameItem> {
        self.page_items.iter().find(|item| item.is_cursor)
    }

    /// Items in one column of the current page, top to bottom.
    pub fn column(&self, column: usize) -> impl Iterator<Item = &FrameItem> {
        self.page_items.iter().filter(move |item| item.column == column)
    }
}
