//! Decoded user input.

use crate::nav::navigator::Movement;
use crate::nav::sort::SortMode;

/// One already-decoded user intent.
///
/// Browse intents act on the listing. While a dialog is open, `Char`,
/// `Backspace`, `Submit`, `Confirm`, `Esc`, `Up` and `Down` are routed to
/// the dialog instead and everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    /// Mark or unmark the cursor item.
    Toggle,
    SelectAll,
    /// Open the sort menu.
    Sort,
    /// Sort by a mode directly, ascending.
    QuickSort(SortMode),
    /// Open the view mode menu.
    View,
    /// Open the column layout menu.
    Layout,
    /// Request a column count directly.
    QuickColumns(usize),
    Copy,
    Cut,
    Paste,
    Rename,
    Delete,
    NewFolder,
    NewFile,
    Search,
    Filter,
    Compress,
    Extract,
    /// Enter the cursor directory or open the cursor file.
    Open,
    /// Go to the parent directory.
    Back,
    /// Rescan the current directory.
    Refresh,
    Esc,
    Quit,
    Char(char),
    Backspace,
    Submit,
    Confirm(bool),
    Resize { cols: u16, rows: u16 },
}

impl Intent {
    /// The grid movement this intent stands for, if any.
    pub fn movement(self) -> Option<Movement> {
        match self {
            Intent::Up => Some(Movement::Up),
            Intent::Down => Some(Movement::Down),
            Intent::Left => Some(Movement::Left),
            Intent::Right => Some(Movement::Right),
            Intent::PageUp => Some(Movement::PageUp),
            Intent::PageDown => Some(Movement::PageDown),
            _ => None,
        }
    }
}
