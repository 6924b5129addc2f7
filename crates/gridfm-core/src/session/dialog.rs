//! Pending dialogs.
//!
//! The session owns the dialog state; the frontend only draws it and feeds
//! keystrokes back as intents.

use std::path::PathBuf;

use crate::fs::archive::ArchiveFormat;
use crate::nav::grid::MAX_COLUMNS;
use crate::nav::sort::SortMode;
use crate::nav::view::ViewMode;

/// Extension used when the new-file extension prompt is left empty.
pub const DEFAULT_NEW_FILE_EXTENSION: &str = "txt";

/// What a text prompt is collecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPurpose {
    /// Live search; the filter in force before the search began is restored on cancel.
    Search { previous_filter: Option<String> },
    /// Live extension filter; the previous filter/search is restored on cancel.
    Filter {
        previous_filter: Option<String>,
        previous_search: Option<String>,
    },
    Rename { target: PathBuf, original: String },
    NewFolder,
    NewFileName,
    NewFileExtension { name: String },
    ArchiveName {
        format: ArchiveFormat,
        sources: Vec<PathBuf>,
    },
}

/// What a yes/no prompt guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmPurpose {
    Delete { paths: Vec<PathBuf> },
}

/// Which option list a menu shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuPurpose {
    Sort,
    View,
    Layout,
    CompressFormat { sources: Vec<PathBuf> },
}

impl MenuPurpose {
    pub fn options(&self) -> Vec<String> {
        match self {
            MenuPurpose::Sort => SortMode::ALL
                .iter()
                .enumerate()
                .map(|(i, m)| format!("[{}] {}", i + 1, m.label()))
                .chain(std::iter::once("[R] Reverse order".to_string()))
                .collect(),
            MenuPurpose::View => ViewMode::ALL
                .iter()
                .enumerate()
                .map(|(i, v)| format!("[{}] {}", i + 1, v.label()))
                .collect(),
            MenuPurpose::Layout => (1..=MAX_COLUMNS)
                .map(|n| {
                    let plural = if n == 1 { "" } else { "s" };
                    format!("[{n}] {n} Column{plural}")
                })
                .collect(),
            MenuPurpose::CompressFormat { .. } => ArchiveFormat::ALL
                .iter()
                .enumerate()
                .map(|(i, f)| format!("[{}] {}", i + 1, f.label()))
                .collect(),
        }
    }

    /// How many options can be picked by pressing their number.
    pub fn numbered(&self) -> usize {
        match self {
            MenuPurpose::Sort => SortMode::ALL.len(),
            MenuPurpose::View => ViewMode::ALL.len(),
            MenuPurpose::Layout => MAX_COLUMNS,
            MenuPurpose::CompressFormat { .. } => ArchiveFormat::ALL.len(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MenuPurpose::Sort => "Sort By",
            MenuPurpose::View => "View Mode",
            MenuPurpose::Layout => "Column Layout",
            MenuPurpose::CompressFormat { .. } => "Compression Format",
        }
    }
}

/// A dialog waiting for input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Text { purpose: TextPurpose, value: String },
    Confirm { purpose: ConfirmPurpose, message: String },
    Menu { purpose: MenuPurpose, selected: usize },
}

impl Dialog {
    pub fn text(purpose: TextPurpose, value: impl Into<String>) -> Self {
        Dialog::Text {
            purpose,
            value: value.into(),
        }
    }

    pub fn menu(purpose: MenuPurpose, selected: usize) -> Self {
        Dialog::Menu { purpose, selected }
    }

    /// Popup title.
    pub fn title(&self) -> &'static str {
        match self {
            Dialog::Text { purpose, .. } => match purpose {
                TextPurpose::Search { .. } => "Search",
                TextPurpose::Filter { .. } => "Filter",
                TextPurpose::Rename { .. } => "Rename",
                TextPurpose::NewFolder => "New Folder",
                TextPurpose::NewFileName | TextPurpose::NewFileExtension { .. } => "New File",
                TextPurpose::ArchiveName { .. } => "Compress",
            },
            Dialog::Confirm { .. } => "Confirm",
            Dialog::Menu { purpose, .. } => purpose.title(),
        }
    }

    /// Prompt line shown above the input or options.
    pub fn prompt(&self) -> String {
        match self {
            Dialog::Text { purpose, .. } => match purpose {
                TextPurpose::Search { .. } => "Type to search".to_string(),
                TextPurpose::Filter { .. } => "Filter by extension (e.g. txt)".to_string(),
                TextPurpose::Rename { original, .. } => format!("New name for {original}"),
                TextPurpose::NewFolder => "Folder name".to_string(),
                TextPurpose::NewFileName => "File name (without extension)".to_string(),
                TextPurpose::NewFileExtension { name } => {
                    format!("Extension for {name} (default {DEFAULT_NEW_FILE_EXTENSION})")
                }
                TextPurpose::ArchiveName { format, .. } => {
                    format!("Archive name (.{} is added)", format.extension())
                }
            },
            Dialog::Confirm { message, .. } => message.clone(),
            Dialog::Menu { .. } => "Choose with arrows or number, Enter to apply".to_string(),
        }
    }

    /// Current text input, for text dialogs.
    pub fn input(&self) -> Option<&str> {
        match self {
            Dialog::Text { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Menu options with the highlighted index, for menus.
    pub fn menu_options(&self) -> Option<(Vec<String>, usize)> {
        match self {
            Dialog::Menu { purpose, selected } => Some((purpose.options(), *selected)),
            _ => None,
        }
    }

    /// Returns `true` for prompts whose keystrokes change the listing live.
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            Dialog::Text {
                purpose: TextPurpose::Search { .. } | TextPurpose::Filter { .. },
                ..
            }
        )
    }
}
