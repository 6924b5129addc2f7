//! The browsing session.
//!
//! [`BrowserSession`] is one immutable value holding the directory, listing,
//! sort, filter, search, clipboard, layout preference and any open dialog.
//! Every intent consumes the session and returns the next one, so the
//! listing, cursor and marks are always replaced together.

pub mod dialog;
pub mod frame;
pub mod intent;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::settings::Config;
use crate::fs::archive::{is_archive, ArchiveFormat};
use crate::fs::entry::Entry;
use crate::fs::ops::validate_name;
use crate::fs::{FileSystem, OpOutcome};
use crate::nav::clipboard::{ClipboardMode, ClipboardState};
use crate::nav::filter::{filter_by_extension, normalize_extension, search_entries};
use crate::nav::grid::{ChromeLines, GridLayout, MAX_COLUMNS};
use crate::nav::navigator::{navigate, page_for, Movement};
use crate::nav::sort::{sort_entries, SortMode, SortSpec};
use crate::nav::view::{ItemView, ViewMode};

pub use dialog::{ConfirmPurpose, Dialog, MenuPurpose, TextPurpose, DEFAULT_NEW_FILE_EXTENSION};
pub use frame::{FrameItem, ViewFrame};
pub use intent::Intent;

/// Terminal size assumed until the frontend reports one.
pub const DEFAULT_TERMINAL_SIZE: (u16, u16) = (80, 24);

#[derive(Debug, Clone)]
pub struct BrowserSession {
    current_dir: PathBuf,
    all_items: Vec<Entry>,
    view: ItemView,
    sort: SortSpec,
    filter: Option<String>,
    search: Option<String>,
    clipboard: ClipboardState,
    requested_columns: usize,
    view_mode: ViewMode,
    show_icons: bool,
    confirm_delete: bool,
    terminal: (u16, u16),
    status: Option<String>,
    dialog: Option<Dialog>,
    should_quit: bool,
}

impl BrowserSession {
    /// Starts a session in `dir` with preferences from `config`.
    pub fn open(dir: PathBuf, config: &Config, fs: &impl FileSystem) -> Self {
        let dir = fs.resolve(&dir);
        info!(dir = %dir.display(), "session started");
        let session = Self {
            current_dir: dir.clone(),
            all_items: Vec::new(),
            view: ItemView::default(),
            sort: config.general.sort_spec(),
            filter: None,
            search: None,
            clipboard: ClipboardState::empty(),
            requested_columns: config.general.columns(),
            view_mode: config.general.view_mode(),
            show_icons: config.ui.show_icons,
            confirm_delete: config.general.confirm_delete,
            terminal: DEFAULT_TERMINAL_SIZE,
            status: None,
            dialog: None,
            should_quit: false,
        };
        session.enter_directory(dir, fs)
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// The freshly scanned, unfiltered listing.
    pub fn all_items(&self) -> &[Entry] {
        &self.all_items
    }

    /// The displayed listing with cursor and marks.
    pub fn view(&self) -> &ItemView {
        &self.view
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn clipboard(&self) -> &ClipboardState {
        &self.clipboard
    }

    pub fn requested_columns(&self) -> usize {
        self.requested_columns
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn with_terminal_size(self, cols: u16, rows: u16) -> Self {
        Self {
            terminal: (cols, rows),
            ..self
        }
    }

    /// The grid geometry for the current listing and terminal.
    pub fn layout(&self) -> GridLayout {
        self.layout_with_chrome().0
    }

    /// Applies one intent.
    pub fn handle(self, intent: Intent, fs: &impl FileSystem) -> Self {
        debug!(?intent, dir = %self.current_dir.display(), "handling intent");
        if let Intent::Resize { cols, rows } = intent {
            return self.with_terminal_size(cols, rows);
        }

        let mut session = Self {
            status: None,
            ..self
        };
        if let Some(dialog) = session.dialog.take() {
            return session.handle_dialog(dialog, intent, fs);
        }

        if let Some(movement) = intent.movement() {
            return session.move_cursor(movement);
        }

        match intent {
            Intent::Toggle => session.toggle_cursor(),
            Intent::SelectAll => session.select_all(),
            Intent::Sort => {
                let selected = SortMode::ALL
                    .iter()
                    .position(|&m| m == session.sort.mode)
                    .unwrap_or(0);
                session.with_dialog(Dialog::menu(MenuPurpose::Sort, selected))
            }
            Intent::QuickSort(mode) => session.apply_sort(SortSpec::new(mode, false)),
            Intent::View => {
                let selected = ViewMode::ALL
                    .iter()
                    .position(|&v| v == session.view_mode)
                    .unwrap_or(0);
                session.with_dialog(Dialog::menu(MenuPurpose::View, selected))
            }
            Intent::Layout => {
                let selected = session.requested_columns.saturating_sub(1);
                session.with_dialog(Dialog::menu(MenuPurpose::Layout, selected))
            }
            Intent::QuickColumns(columns) => session.apply_columns(columns),
            Intent::Copy => session.stage(ClipboardMode::Copy),
            Intent::Cut => session.stage(ClipboardMode::Cut),
            Intent::Paste => session.paste(fs),
            Intent::Rename => session.begin_rename(),
            Intent::Delete => session.begin_delete(fs),
            Intent::NewFolder => session.with_dialog(Dialog::text(TextPurpose::NewFolder, "")),
            Intent::NewFile => session.with_dialog(Dialog::text(TextPurpose::NewFileName, "")),
            Intent::Search => session.begin_search(),
            Intent::Filter => session.begin_filter(),
            Intent::Compress => session.begin_compress(),
            Intent::Extract => session.extract(fs),
            Intent::Open => session.open_cursor(fs),
            Intent::Back => session.go_up(fs),
            Intent::Refresh => session.rescan(fs, None).with_status("Refreshed"),
            Intent::Esc => session.escape(),
            Intent::Quit => {
                info!("quit requested");
                Self {
                    should_quit: true,
                    ..session
                }
            }
            // Dialog replies and movement with nothing to act on.
            Intent::Up
            | Intent::Down
            | Intent::Left
            | Intent::Right
            | Intent::PageUp
            | Intent::PageDown
            | Intent::Char(_)
            | Intent::Backspace
            | Intent::Submit
            | Intent::Confirm(_)
            | Intent::Resize { .. } => session,
        }
    }

    /// Builds the render snapshot for the current state.
    pub fn frame(&self) -> ViewFrame {
        let (layout, chrome) = self.layout_with_chrome();
        let cursor = self.view.cursor();
        let page = page_for(cursor, &layout);
        let selection = self.view.selection();

        let page_items = layout
            .page_range(page, self.view.len())
            .filter_map(|index| {
                let entry = self.view.items().get(index)?;
                let cell = layout.cell_of(index);
                Some(FrameItem {
                    index,
                    row: cell.row,
                    column: cell.column,
                    entry: entry.clone(),
                    is_cursor: index == cursor,
                    is_marked: selection.contains(index),
                })
            })
            .collect();

        ViewFrame {
            path: self.current_dir.clone(),
            page_items,
            selected_index: cursor,
            total_items: self.view.len(),
            page,
            marked_count: selection.len(),
            clipboard_summary: self.clipboard.summary(),
            sort_summary: self.sort.summary(),
            view_summary: format!("View: {}", self.view_mode.label()),
            banner: self.banner(),
            layout_summary: layout.summary(page),
            status_message: self.status.clone(),
            layout,
            view_mode: self.view_mode,
            show_icons: self.show_icons,
            chrome,
            dialog: self.dialog.clone(),
        }
    }

    // --- derived state ---

    fn derive_items(&self) -> Vec<Entry> {
        let sorted = sort_entries(&self.all_items, self.sort);
        match (&self.search, &self.filter) {
            (Some(query), _) => search_entries(&sorted, query),
            (None, Some(ext)) => filter_by_extension(&sorted, ext),
            (None, None) => sorted,
        }
    }

    /// Rebuilds the displayed listing. Marks are dropped.
    fn recompute(self, cursor: usize) -> Self {
        let items = self.derive_items();
        Self {
            view: ItemView::with_cursor(items, cursor),
            ..self
        }
    }

    fn layout_with_chrome(&self) -> (GridLayout, ChromeLines) {
        let chrome = ChromeLines {
            message: self.status.is_some(),
            banner: self.banner().is_some(),
            clipboard: !self.clipboard.is_empty(),
            page: false,
        };
        GridLayout::with_chrome(self.requested_columns, self.view.len(), self.terminal.1, chrome)
    }

    fn banner(&self) -> Option<String> {
        if let Some(Dialog::Text { purpose, value }) = &self.dialog {
            match purpose {
                TextPurpose::Search { .. } => return Some(format!("Search: {value}_")),
                TextPurpose::Filter { .. } => return Some(format!("Filter Extension: .{value}_")),
                _ => {}
            }
        }
        if let Some(query) = &self.search {
            return Some(format!("Search: '{query}'"));
        }
        self.filter.as_ref().map(|ext| format!("Active Filter: *.{ext}"))
    }

    /// Visible entries, not counting "..".
    fn visible_count(&self) -> usize {
        self.view.items().iter().filter(|e| !e.is_parent()).count()
    }

    fn name_taken(&self, name: &str) -> bool {
        self.all_items
            .iter()
            .any(|e| e.is_actionable() && e.name() == name)
    }

    /// The cursor entry if an operation named `verb` may act on it.
    fn cursor_target(&self, verb: &str) -> Result<Entry, String> {
        match self.view.selected_entry() {
            Some(entry) if entry.is_parent() => {
                Err(format!("Cannot {verb} parent directory marker"))
            }
            Some(entry) if entry.is_actionable() => Ok(entry.clone()),
            _ => Err(format!("Nothing to {verb}")),
        }
    }

    fn with_status(self, message: impl Into<String>) -> Self {
        Self {
            status: Some(message.into()),
            ..self
        }
    }

    fn with_dialog(self, dialog: Dialog) -> Self {
        Self {
            dialog: Some(dialog),
            ..self
        }
    }

    // --- directory changes ---

    fn enter_directory(self, dir: PathBuf, fs: &impl FileSystem) -> Self {
        let all_items = fs.scan(&dir);
        debug!(dir = %dir.display(), entries = all_items.len(), "entered directory");
        Self {
            current_dir: dir,
            all_items,
            search: None,
            ..self
        }
        .recompute(0)
    }

    /// Rescans the current directory after an operation. The cursor stays
    /// where it was, clamped, unless `focus` names an entry to land on.
    fn rescan(self, fs: &impl FileSystem, focus: Option<&str>) -> Self {
        let cursor = self.view.cursor();
        let session = Self {
            all_items: fs.scan(&self.current_dir),
            ..self
        };
        let items = session.derive_items();
        let cursor = focus
            .and_then(|name| items.iter().position(|e| e.name() == name))
            .unwrap_or(cursor);
        Self {
            view: ItemView::with_cursor(items, cursor),
            ..session
        }
    }

    fn after_operation(
        self,
        outcome: OpOutcome,
        focus: Option<&str>,
        fs: &impl FileSystem,
    ) -> Self {
        if outcome.success {
            info!(message = %outcome.message, "operation succeeded");
        } else {
            warn!(message = %outcome.message, "operation failed");
        }
        let focus = focus.filter(|_| outcome.success);
        self.rescan(fs, focus).with_status(outcome.message)
    }

    fn open_cursor(self, fs: &impl FileSystem) -> Self {
        let Some(entry) = self.view.selected_entry().cloned() else {
            return self;
        };
        if entry.is_placeholder() {
            return self;
        }
        if entry.is_parent() {
            return self.go_up(fs);
        }
        if entry.is_dir() {
            if !fs.is_dir(entry.path()) {
                return self.with_status(format!("Cannot access: {}", entry.name()));
            }
            return self
                .enter_directory(entry.path().to_path_buf(), fs)
                .with_status(format!("Opened: {}", entry.name()));
        }
        if fs.open(entry.path()) {
            self.with_status(format!("Opening: {}", entry.name()))
        } else {
            self.with_status(format!("Cannot open: {}", entry.name()))
        }
    }

    fn go_up(self, fs: &impl FileSystem) -> Self {
        let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) else {
            return self.with_status("Already at root directory");
        };
        if !fs.is_dir(&parent) {
            return self.with_status(format!("Cannot access: {}", parent.display()));
        }
        self.enter_directory(parent, fs)
            .with_status("Moved to parent directory")
    }

    // --- navigation and marks ---

    fn move_cursor(self, movement: Movement) -> Self {
        let layout = self.layout();
        let index = navigate(self.view.cursor(), movement, self.view.len(), &layout);
        Self {
            view: self.view.with_cursor_at(index),
            ..self
        }
    }

    fn toggle_cursor(self) -> Self {
        let name = match self.cursor_target("select") {
            Ok(entry) => entry.name().to_string(),
            Err(message) => return self.with_status(message),
        };
        let index = self.view.cursor();
        let view = self.view.toggle(index);
        let message = if view.selection().contains(index) {
            format!("Selected: {name}")
        } else {
            format!("Deselected: {name}")
        };
        Self { view, ..self }.with_status(message)
    }

    fn select_all(self) -> Self {
        if !self.view.selection().is_empty() {
            return Self {
                view: self.view.select_all(),
                ..self
            }
            .with_status("Deselected all items");
        }
        let view = self.view.select_all();
        let count = view.selection().len();
        let session = Self { view, ..self };
        if count == 0 {
            session.with_status("Nothing to select")
        } else {
            session.with_status(format!("Selected {count} items"))
        }
    }

    fn escape(self) -> Self {
        if !self.view.selection().is_empty() {
            Self {
                view: self.view.clear_selection(),
                ..self
            }
            .with_status("Selection cleared")
        } else if self.search.is_some() {
            Self {
                search: None,
                ..self
            }
            .recompute(0)
            .with_status("Search cleared")
        } else if self.filter.is_some() {
            Self {
                filter: None,
                ..self
            }
            .recompute(0)
            .with_status("Filter cleared")
        } else {
            self
        }
    }

    // --- sort, view and layout ---

    fn apply_sort(self, sort: SortSpec) -> Self {
        debug!(?sort, "sort changed");
        Self { sort, ..self }
            .recompute(0)
            .with_status(format!("Sorted by: {}", sort.mode.label()))
    }

    fn reverse_sort(self) -> Self {
        let sort = self.sort.toggled();
        Self { sort, ..self }
            .recompute(0)
            .with_status(format!("Sort order reversed: {}", sort.direction_label()))
    }

    fn apply_view(self, view_mode: ViewMode) -> Self {
        Self { view_mode, ..self }.with_status(format!("View mode: {}", view_mode.label()))
    }

    fn apply_columns(self, columns: usize) -> Self {
        let requested_columns = columns.clamp(1, MAX_COLUMNS);
        let plural = if requested_columns == 1 { "" } else { "s" };
        Self {
            requested_columns,
            ..self
        }
        .with_status(format!("Layout: {requested_columns} column{plural}"))
    }

    // --- clipboard ---

    fn stage(self, mode: ClipboardMode) -> Self {
        let verb = match mode {
            ClipboardMode::Copy => "copy",
            ClipboardMode::Cut => "cut",
        };
        let paths = self.view.target_paths();
        if paths.is_empty() {
            let message = self
                .cursor_target(verb)
                .err()
                .unwrap_or_else(|| format!("Nothing to {verb}"));
            return self.with_status(message);
        }

        let done = match mode {
            ClipboardMode::Copy => "Copied",
            ClipboardMode::Cut => "Cut",
        };
        let message = match paths.as_slice() {
            [only] => format!("{done} to clipboard: {}", file_name(only)),
            many => format!("{done} {} items to clipboard", many.len()),
        };
        let clipboard = match mode {
            ClipboardMode::Copy => ClipboardState::copy(paths),
            ClipboardMode::Cut => ClipboardState::cut(paths),
        };
        Self {
            clipboard,
            view: self.view.clear_selection(),
            ..self
        }
        .with_status(message)
    }

    fn paste(self, fs: &impl FileSystem) -> Self {
        let Some(request) = self.clipboard.paste_request(&self.current_dir) else {
            return self.with_status("Clipboard is empty");
        };
        let outcome = match request.mode {
            ClipboardMode::Copy => fs.copy_items(&request.paths, &request.destination),
            ClipboardMode::Cut => fs.move_items(&request.paths, &request.destination),
        };
        let clipboard = self.clipboard.after_paste(outcome.success);
        Self { clipboard, ..self }.after_operation(outcome, None, fs)
    }

    // --- file operations ---

    fn begin_rename(self) -> Self {
        if !self.view.selection().is_empty() {
            return self.with_status("Cannot rename multiple items at once. Select a single item.");
        }
        match self.cursor_target("rename") {
            Ok(entry) => {
                let purpose = TextPurpose::Rename {
                    target: entry.path().to_path_buf(),
                    original: entry.name().to_string(),
                };
                self.with_dialog(Dialog::text(purpose, entry.name()))
            }
            Err(message) => self.with_status(message),
        }
    }

    fn finish_rename(
        self,
        target: PathBuf,
        original: String,
        name: &str,
        fs: &impl FileSystem,
    ) -> Self {
        if name.is_empty() {
            return self.with_status("Name cannot be empty");
        }
        if name == original {
            return self.with_status("Name unchanged");
        }
        if validate_name(name).is_err() {
            return self.with_status(format!("Invalid name: {name}"));
        }
        if self.name_taken(name) {
            return self.with_status(format!("Name already exists: {name}"));
        }
        let outcome = fs.rename(&target, name);
        self.after_operation(outcome, Some(name), fs)
    }

    fn begin_delete(self, fs: &impl FileSystem) -> Self {
        let paths = self.view.target_paths();
        if paths.is_empty() {
            let message = self
                .cursor_target("delete")
                .err()
                .unwrap_or_else(|| "Nothing to delete".to_string());
            return self.with_status(message);
        }
        if !self.confirm_delete {
            return self.delete_now(paths, fs);
        }
        let message = match paths.as_slice() {
            [only] => format!("Delete '{}'? This cannot be undone!", file_name(only)),
            many => format!("Delete {} items? This cannot be undone!", many.len()),
        };
        self.with_dialog(Dialog::Confirm {
            purpose: ConfirmPurpose::Delete { paths },
            message,
        })
    }

    fn delete_now(self, paths: Vec<PathBuf>, fs: &impl FileSystem) -> Self {
        let outcome = fs.delete_items(&paths);
        self.after_operation(outcome, None, fs)
    }

    fn finish_new_folder(self, name: &str, fs: &impl FileSystem) -> Self {
        if name.is_empty() {
            return self.with_status("Folder name cannot be empty");
        }
        if validate_name(name).is_err() {
            return self.with_status(format!("Invalid name: {name}"));
        }
        if self.name_taken(name) {
            return self.with_status(format!("Folder already exists: {name}"));
        }
        let outcome = fs.create_folder(&self.current_dir, name);
        self.after_operation(outcome, Some(name), fs)
    }

    fn finish_new_file(self, name: &str, fs: &impl FileSystem) -> Self {
        if validate_name(name).is_err() {
            return self.with_status(format!("Invalid name: {name}"));
        }
        if self.name_taken(name) {
            return self.with_status(format!("File already exists: {name}"));
        }
        let outcome = fs.create_file(&self.current_dir, name);
        self.after_operation(outcome, Some(name), fs)
    }

    fn begin_compress(self) -> Self {
        let sources = self.view.target_paths();
        if sources.is_empty() {
            let message = self
                .cursor_target("compress")
                .err()
                .unwrap_or_else(|| "Nothing to compress".to_string());
            return self.with_status(message);
        }
        self.with_dialog(Dialog::menu(MenuPurpose::CompressFormat { sources }, 0))
    }

    fn finish_compress(
        self,
        format: ArchiveFormat,
        sources: Vec<PathBuf>,
        base: &str,
        fs: &impl FileSystem,
    ) -> Self {
        if base.is_empty() {
            return self.with_status("Archive name cannot be empty");
        }
        let suffix = format!(".{}", format.extension());
        let name = if base.to_lowercase().ends_with(&suffix) {
            base.to_string()
        } else {
            format!("{base}{suffix}")
        };
        if validate_name(&name).is_err() {
            return self.with_status(format!("Invalid name: {name}"));
        }
        if self.name_taken(&name) {
            return self.with_status(format!("Item already exists: {name}"));
        }
        let output = self.current_dir.join(&name);
        let outcome = fs.compress(&sources, &output, format);
        self.after_operation(outcome, Some(&name), fs)
    }

    fn extract(self, fs: &impl FileSystem) -> Self {
        let entry = match self.cursor_target("extract") {
            Ok(entry) => entry,
            Err(message) => return self.with_status(message),
        };
        if entry.is_dir() || !is_archive(entry.name()) {
            return self.with_status(format!("Not an archive: {}", entry.name()));
        }
        let outcome = fs.extract(entry.path(), &self.current_dir);
        self.after_operation(outcome, None, fs)
    }

    // --- search and filter ---

    fn begin_search(self) -> Self {
        let previous_filter = self.filter.clone();
        let value = self.search.clone().unwrap_or_default();
        Self {
            filter: None,
            dialog: Some(Dialog::text(TextPurpose::Search { previous_filter }, value)),
            ..self
        }
        .recompute(0)
    }

    fn begin_filter(self) -> Self {
        let purpose = TextPurpose::Filter {
            previous_filter: self.filter.clone(),
            previous_search: self.search.clone(),
        };
        let value = self.filter.clone().unwrap_or_default();
        self.with_dialog(Dialog::text(purpose, value))
    }

    // --- dialogs ---

    fn handle_dialog(self, dialog: Dialog, intent: Intent, fs: &impl FileSystem) -> Self {
        match dialog {
            Dialog::Text { purpose, value } => self.handle_text(purpose, value, intent, fs),
            Dialog::Confirm { purpose, message } => {
                self.handle_confirm(purpose, message, intent, fs)
            }
            Dialog::Menu { purpose, selected } => self.handle_menu(purpose, selected, intent),
        }
    }

    fn handle_text(
        self,
        purpose: TextPurpose,
        value: String,
        intent: Intent,
        fs: &impl FileSystem,
    ) -> Self {
        match intent {
            Intent::Char(c) if accepts_char(&purpose, c) => {
                let mut value = value;
                value.push(c);
                self.edit_text(purpose, value)
            }
            Intent::Backspace => {
                let mut value = value;
                value.pop();
                self.edit_text(purpose, value)
            }
            Intent::Submit => self.submit_text(purpose, value, fs),
            Intent::Esc => self.cancel_text(purpose),
            _ => self.with_dialog(Dialog::text(purpose, value)),
        }
    }

    /// Stores the edited value. Search and filter prompts re-derive the
    /// listing on every keystroke.
    fn edit_text(self, purpose: TextPurpose, value: String) -> Self {
        match purpose {
            TextPurpose::Search { .. } => {
                let search = (!value.is_empty()).then(|| value.clone());
                Self {
                    search,
                    dialog: Some(Dialog::text(purpose, value)),
                    ..self
                }
                .recompute(0)
            }
            TextPurpose::Filter { .. } => {
                let ext = normalize_extension(&value);
                let filter = (!ext.is_empty()).then_some(ext);
                Self {
                    filter,
                    search: None,
                    dialog: Some(Dialog::text(purpose, value)),
                    ..self
                }
                .recompute(0)
            }
            _ => self.with_dialog(Dialog::text(purpose, value)),
        }
    }

    fn submit_text(self, purpose: TextPurpose, value: String, fs: &impl FileSystem) -> Self {
        match purpose {
            TextPurpose::Search { previous_filter } => {
                if value.is_empty() {
                    return Self {
                        search: None,
                        filter: previous_filter,
                        ..self
                    }
                    .recompute(0)
                    .with_status("Search cancelled");
                }
                let session = Self {
                    search: Some(value.clone()),
                    filter: None,
                    ..self
                }
                .recompute(0);
                let found = session.visible_count();
                session.with_status(format!("Search results: {found} items found for '{value}'"))
            }
            TextPurpose::Filter { .. } => {
                let ext = normalize_extension(&value);
                if ext.is_empty() {
                    return Self {
                        filter: None,
                        search: None,
                        ..self
                    }
                    .recompute(0)
                    .with_status("Filter cleared");
                }
                let session = Self {
                    filter: Some(ext.clone()),
                    search: None,
                    ..self
                }
                .recompute(0);
                let shown = session.visible_count();
                session.with_status(format!("Filtered by *.{ext}: {shown} items"))
            }
            TextPurpose::Rename { target, original } => {
                self.finish_rename(target, original, value.trim(), fs)
            }
            TextPurpose::NewFolder => self.finish_new_folder(value.trim(), fs),
            TextPurpose::NewFileName => {
                let name = value.trim();
                if name.is_empty() {
                    return self.with_status("File name cannot be empty");
                }
                let purpose = TextPurpose::NewFileExtension {
                    name: name.to_string(),
                };
                self.with_dialog(Dialog::text(purpose, DEFAULT_NEW_FILE_EXTENSION))
            }
            TextPurpose::NewFileExtension { name } => {
                let ext = match value.trim() {
                    "" => DEFAULT_NEW_FILE_EXTENSION,
                    ext => ext,
                };
                self.finish_new_file(&format!("{name}.{ext}"), fs)
            }
            TextPurpose::ArchiveName { format, sources } => {
                self.finish_compress(format, sources, value.trim(), fs)
            }
        }
    }

    fn cancel_text(self, purpose: TextPurpose) -> Self {
        match purpose {
            TextPurpose::Search { previous_filter } => Self {
                search: None,
                filter: previous_filter,
                ..self
            }
            .recompute(0)
            .with_status("Search cancelled"),
            TextPurpose::Filter {
                previous_filter,
                previous_search,
            } => Self {
                filter: previous_filter,
                search: previous_search,
                ..self
            }
            .recompute(0)
            .with_status("Filter cancelled"),
            TextPurpose::Rename { .. } => self.with_status("Rename cancelled"),
            TextPurpose::NewFolder
            | TextPurpose::NewFileName
            | TextPurpose::NewFileExtension { .. } => self.with_status("Cancelled"),
            TextPurpose::ArchiveName { .. } => self.with_status("Compression cancelled"),
        }
    }

    fn handle_confirm(
        self,
        purpose: ConfirmPurpose,
        message: String,
        intent: Intent,
        fs: &impl FileSystem,
    ) -> Self {
        let answer = match intent {
            Intent::Confirm(answer) => Some(answer),
            Intent::Submit | Intent::Char('y' | 'Y') => Some(true),
            Intent::Esc | Intent::Char('n' | 'N') => Some(false),
            _ => None,
        };
        match (answer, purpose) {
            (Some(true), ConfirmPurpose::Delete { paths }) => self.delete_now(paths, fs),
            (Some(false), ConfirmPurpose::Delete { .. }) => self.with_status("Delete cancelled"),
            (None, purpose) => self.with_dialog(Dialog::Confirm { purpose, message }),
        }
    }

    fn handle_menu(self, purpose: MenuPurpose, selected: usize, intent: Intent) -> Self {
        let last = purpose.options().len().saturating_sub(1);
        match intent {
            Intent::Up => self.with_dialog(Dialog::menu(purpose, selected.saturating_sub(1))),
            Intent::Down => self.with_dialog(Dialog::menu(purpose, (selected + 1).min(last))),
            Intent::Submit => self.choose(purpose, selected),
            Intent::Char('r' | 'R') if purpose == MenuPurpose::Sort => {
                self.choose(purpose, SortMode::ALL.len())
            }
            Intent::Char(c) => match c.to_digit(10).map(|d| d as usize) {
                Some(n) if (1..=purpose.numbered()).contains(&n) => self.choose(purpose, n - 1),
                _ => self.with_dialog(Dialog::menu(purpose, selected)),
            },
            Intent::Esc => self.with_status(format!("{} cancelled", purpose.title())),
            _ => self.with_dialog(Dialog::menu(purpose, selected)),
        }
    }

    fn choose(self, purpose: MenuPurpose, index: usize) -> Self {
        match purpose {
            MenuPurpose::Sort => match SortMode::ALL.get(index) {
                Some(&mode) => {
                    let sort = self.sort.with_mode(mode);
                    self.apply_sort(sort)
                }
                None => self.reverse_sort(),
            },
            MenuPurpose::View => match ViewMode::ALL.get(index) {
                Some(&mode) => self.apply_view(mode),
                None => self,
            },
            MenuPurpose::Layout => self.apply_columns(index + 1),
            MenuPurpose::CompressFormat { sources } => match ArchiveFormat::ALL.get(index) {
                Some(&format) => {
                    let name = default_archive_name(&sources);
                    let purpose = TextPurpose::ArchiveName { format, sources };
                    self.with_dialog(Dialog::text(purpose, name))
                }
                None => self,
            },
        }
    }
}

/// Whether a typed character may enter a text prompt.
fn accepts_char(purpose: &TextPurpose, c: char) -> bool {
    match purpose {
        TextPurpose::NewFileExtension { .. } => c.is_alphanumeric(),
        _ => !c.is_control(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// The single source's stem, or `archive` for several.
fn default_archive_name(sources: &[PathBuf]) -> String {
    match sources {
        [only] => only
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "archive".to_string()),
        _ => "archive".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;

    use tempfile::TempDir;

    use crate::fs::LocalFileSystem;

    /// In-memory filesystem recording every mutating call.
    struct FakeFs {
        listings: HashMap<PathBuf, Vec<Entry>>,
        outcome: OpOutcome,
        calls: RefCell<Vec<String>>,
    }

    impl FakeFs {
        fn new() -> Self {
            Self {
                listings: HashMap::new(),
                outcome: OpOutcome::ok("done"),
                calls: RefCell::new(Vec::new()),
            }
        }

        /// Adds `dir` with subdirectories `dirs` and files `files`.
        fn with_dir(mut self, dir: &str, dirs: &[&str], files: &[&str]) -> Self {
            let dir = PathBuf::from(dir);
            let mut entries = Vec::new();
            if let Some(parent) = dir.parent() {
                entries.push(Entry::parent(parent.to_path_buf()));
            }
            entries.extend(dirs.iter().map(|d| Entry::directory(dir.join(d))));
            entries.extend(
                files
                    .iter()
                    .map(|f| Entry::file(dir.join(f), "1.0 KB".to_string(), "N/A".to_string())),
            );
            self.listings.insert(dir, entries);
            self
        }

        fn failing(self, message: &str) -> Self {
            Self {
                outcome: OpOutcome::failed(message),
                ..self
            }
        }

        fn record(&self, call: String) -> OpOutcome {
            self.calls.borrow_mut().push(call);
            self.outcome.clone()
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    fn names_of(paths: &[PathBuf]) -> String {
        paths.iter().map(|p| file_name(p)).collect::<Vec<_>>().join(",")
    }

    impl FileSystem for FakeFs {
        fn scan(&self, dir: &Path) -> Vec<Entry> {
            self.listings
                .get(dir)
                .cloned()
                .unwrap_or_else(|| vec![Entry::error("Error: not found")])
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.listings.contains_key(path)
        }

        fn copy_items(&self, sources: &[PathBuf], dest_dir: &Path) -> OpOutcome {
            self.record(format!("copy {} -> {}", names_of(sources), dest_dir.display()))
        }

        fn move_items(&self, sources: &[PathBuf], dest_dir: &Path) -> OpOutcome {
            self.record(format!("move {} -> {}", names_of(sources), dest_dir.display()))
        }

        fn delete_items(&self, paths: &[PathBuf]) -> OpOutcome {
            self.record(format!("delete {}", names_of(paths)))
        }

        fn rename(&self, path: &Path, new_name: &str) -> OpOutcome {
            self.record(format!("rename {} -> {new_name}", file_name(path)))
        }

        fn create_folder(&self, parent: &Path, name: &str) -> OpOutcome {
            self.record(format!("mkdir {} {name}", parent.display()))
        }

        fn create_file(&self, parent: &Path, name: &str) -> OpOutcome {
            self.record(format!("touch {} {name}", parent.display()))
        }

        fn open(&self, path: &Path) -> bool {
            self.record(format!("open {}", file_name(path))).success
        }

        fn compress(&self, sources: &[PathBuf], output: &Path, format: ArchiveFormat) -> OpOutcome {
            self.record(format!(
                "compress {} -> {} ({})",
                names_of(sources),
                file_name(output),
                format.extension()
            ))
        }

        fn extract(&self, archive: &Path, dest_dir: &Path) -> OpOutcome {
            self.record(format!("extract {} -> {}", file_name(archive), dest_dir.display()))
        }
    }

    fn sample_fs() -> FakeFs {
        FakeFs::new()
            .with_dir("/home", &["user"], &[])
            .with_dir("/home/user", &["docs", "music"], &["a.txt", "b.rs", "c.txt", "d.zip"])
            .with_dir("/home/user/docs", &[], &["report.pdf"])
            .with_dir("/", &["home"], &[])
    }

    fn start(fs: &FakeFs) -> BrowserSession {
        BrowserSession::open(PathBuf::from("/home/user"), &Config::default(), fs)
    }

    fn names(session: &BrowserSession) -> Vec<String> {
        session
            .view()
            .items()
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }

    fn run(session: BrowserSession, intents: &[Intent], fs: &FakeFs) -> BrowserSession {
        intents
            .iter()
            .fold(session, |session, &intent| session.handle(intent, fs))
    }

    fn type_text(session: BrowserSession, text: &str, fs: &FakeFs) -> BrowserSession {
        text.chars()
            .fold(session, |session, c| session.handle(Intent::Char(c), fs))
    }

    fn cursor_to(session: BrowserSession, name: &str, fs: &FakeFs) -> BrowserSession {
        let index = names(&session)
            .iter()
            .position(|n| n == name)
            .unwrap_or_else(|| panic!("{name} not listed"));
        run(session, &vec![Intent::Down; index], fs)
    }

    #[test]
    fn open_lists_parent_then_dirs_then_files() {
        let fs = sample_fs();
        let session = start(&fs);
        assert_eq!(names(&session), vec!["..", "docs", "music", "a.txt", "b.rs", "c.txt", "d.zip"]);
        assert_eq!(session.view().cursor(), 0);
        assert!(session.status().is_none());
    }

    #[test]
    fn down_and_up_move_cursor() {
        let fs = sample_fs();
        let session = run(start(&fs), &[Intent::Down, Intent::Down, Intent::Up], &fs);
        assert_eq!(session.view().cursor(), 1);
    }

    #[test]
    fn down_at_end_clamps_in_multi_column_grid() {
        // 12 rows: 8 chrome lines, the page line and 3 grid rows.
        let fs = FakeFs::new().with_dir("/", &[], &["a", "b", "c", "d", "e", "f", "g"]);
        let mut config = Config::default();
        config.general.columns = 2;
        let session = BrowserSession::open(PathBuf::from("/"), &config, &fs).with_terminal_size(80, 12);
        let layout = session.layout();
        assert_eq!(layout.effective_columns, 2);
        assert_eq!(layout.rows_per_page, 3);

        let session = run(session, &vec![Intent::Down; 10], &fs);
        assert_eq!(session.view().cursor(), 6);
    }

    #[test]
    fn enter_directory_resets_cursor_and_marks() {
        let fs = sample_fs();
        let session = run(start(&fs), &[Intent::Down, Intent::Toggle, Intent::Open], &fs);
        assert_eq!(session.current_dir(), Path::new("/home/user/docs"));
        assert_eq!(session.view().cursor(), 0);
        assert!(session.view().selection().is_empty());
        assert_eq!(session.status(), Some("Opened: docs"));
        assert_eq!(names(&session), vec!["..", "report.pdf"]);
    }

    #[test]
    fn open_parent_entry_and_back_go_up() {
        let fs = sample_fs();
        let session = start(&fs).handle(Intent::Open, &fs);
        assert_eq!(session.current_dir(), Path::new("/home"));
        assert_eq!(session.status(), Some("Moved to parent directory"));

        let session = session.handle(Intent::Back, &fs);
        assert_eq!(session.current_dir(), Path::new("/"));
        assert_eq!(names(&session), vec!["home"]);
    }

    #[test]
    fn back_at_root_reports() {
        let fs = sample_fs();
        let session = BrowserSession::open(PathBuf::from("/"), &Config::default(), &fs);
        let session = session.handle(Intent::Back, &fs);
        assert_eq!(session.current_dir(), Path::new("/"));
        assert_eq!(session.status(), Some("Already at root directory"));
    }

    #[test]
    fn opening_file_asks_the_os() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "a.txt", &fs).handle(Intent::Open, &fs);
        assert_eq!(fs.calls(), vec!["open a.txt"]);
        assert_eq!(session.status(), Some("Opening: a.txt"));

        let fs = sample_fs().failing("no handler");
        let session = cursor_to(start(&fs), "a.txt", &fs).handle(Intent::Open, &fs);
        assert_eq!(session.status(), Some("Cannot open: a.txt"));
    }

    #[test]
    fn unreadable_directory_is_not_entered() {
        let fs = FakeFs::new().with_dir("/home/user", &["locked"], &[]);
        let session = cursor_to(start(&fs), "locked", &fs).handle(Intent::Open, &fs);
        assert_eq!(session.current_dir(), Path::new("/home/user"));
        assert_eq!(session.status(), Some("Cannot access: locked"));
    }

    #[test]
    fn toggle_refuses_parent_marker() {
        let fs = sample_fs();
        let session = start(&fs).handle(Intent::Toggle, &fs);
        assert!(session.view().selection().is_empty());
        assert_eq!(session.status(), Some("Cannot select parent directory marker"));
    }

    #[test]
    fn toggle_marks_and_unmarks() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "b.rs", &fs).handle(Intent::Toggle, &fs);
        assert!(session.view().selection().contains(4));
        assert_eq!(session.status(), Some("Selected: b.rs"));

        let session = session.handle(Intent::Toggle, &fs);
        assert!(session.view().selection().is_empty());
        assert_eq!(session.status(), Some("Deselected: b.rs"));
    }

    #[test]
    fn select_all_toggles_collection() {
        let fs = sample_fs();
        let session = start(&fs).handle(Intent::SelectAll, &fs);
        assert_eq!(session.view().selection().len(), 6);
        assert!(!session.view().selection().contains(0));
        assert_eq!(session.status(), Some("Selected 6 items"));

        let session = session.handle(Intent::SelectAll, &fs);
        assert!(session.view().selection().is_empty());
    }

    #[test]
    fn sort_change_clears_marks_and_resets_cursor() {
        let fs = sample_fs();
        let session = run(start(&fs), &[Intent::Down, Intent::Toggle, Intent::Down], &fs);
        let session = session.handle(Intent::QuickSort(SortMode::Type), &fs);
        assert!(session.view().selection().is_empty());
        assert_eq!(session.view().cursor(), 0);
        assert_eq!(session.status(), Some("Sorted by: Type"));
        assert_eq!(names(&session)[0], "..");
    }

    #[test]
    fn sort_menu_picks_mode_and_reverses() {
        let fs = sample_fs();
        let session = run(start(&fs), &[Intent::Sort, Intent::Char('1')], &fs);
        assert!(session.dialog().is_none());
        assert_eq!(session.sort().mode, SortMode::Name);

        let session = run(session, &[Intent::Sort, Intent::Char('r')], &fs);
        assert!(session.sort().reverse);
        assert_eq!(session.status(), Some("Sort order reversed: Descending"));
        assert_eq!(names(&session), vec!["..", "music", "docs", "d.zip", "c.txt", "b.rs", "a.txt"]);
    }

    #[test]
    fn sort_menu_arrows_then_submit() {
        let fs = sample_fs();
        let session = run(start(&fs), &[Intent::Sort, Intent::Down, Intent::Submit], &fs);
        assert_eq!(session.sort().mode, SortMode::Size);
        assert!(session.dialog().is_none());
    }

    #[test]
    fn sort_survives_directory_change() {
        let fs = sample_fs();
        let session = start(&fs).handle(Intent::QuickSort(SortMode::Size), &fs);
        let session = cursor_to(session, "docs", &fs).handle(Intent::Open, &fs);
        assert_eq!(session.sort().mode, SortMode::Size);
    }

    #[test]
    fn layout_and_view_menus() {
        let fs = sample_fs();
        let session = run(start(&fs), &[Intent::Layout, Intent::Char('3')], &fs);
        assert_eq!(session.requested_columns(), 3);
        assert_eq!(session.status(), Some("Layout: 3 columns"));

        let session = run(session, &[Intent::View, Intent::Down, Intent::Down, Intent::Submit], &fs);
        assert_eq!(session.view_mode(), ViewMode::List);

        let session = session.handle(Intent::QuickColumns(9), &fs);
        assert_eq!(session.requested_columns(), 4);
    }

    #[test]
    fn menu_escape_leaves_state() {
        let fs = sample_fs();
        let session = run(start(&fs), &[Intent::Layout, Intent::Down, Intent::Esc], &fs);
        assert_eq!(session.requested_columns(), 1);
        assert!(session.dialog().is_none());
        assert_eq!(session.status(), Some("Column Layout cancelled"));
    }

    #[test]
    fn copy_paste_keeps_clipboard() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "a.txt", &fs).handle(Intent::Copy, &fs);
        assert_eq!(session.status(), Some("Copied to clipboard: a.txt"));

        let session = cursor_to(session.handle(Intent::Back, &fs), "user", &fs);
        let session = session.handle(Intent::Paste, &fs);
        assert_eq!(fs.calls(), vec!["copy a.txt -> /home"]);
        assert_eq!(session.clipboard().paths(), &[PathBuf::from("/home/user/a.txt")]);
        assert_eq!(session.status(), Some("done"));
    }

    #[test]
    fn cut_paste_clears_clipboard_on_success() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "a.txt", &fs).handle(Intent::Cut, &fs);
        let session = run(session, &[Intent::Back, Intent::Paste], &fs);
        assert_eq!(fs.calls(), vec!["move a.txt -> /home"]);
        assert!(session.clipboard().is_empty());
    }

    #[test]
    fn failed_paste_keeps_clipboard() {
        let fs = sample_fs().failing("Item already exists: a.txt");
        let session = cursor_to(start(&fs), "a.txt", &fs).handle(Intent::Cut, &fs);
        let session = session.handle(Intent::Paste, &fs);
        assert_eq!(session.clipboard().mode(), Some(ClipboardMode::Cut));
        assert_eq!(session.status(), Some("Item already exists: a.txt"));
    }

    #[test]
    fn copy_takes_marked_items_and_clears_marks() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "a.txt", &fs);
        let session = run(session, &[Intent::Toggle, Intent::Down, Intent::Down, Intent::Toggle, Intent::Copy], &fs);
        assert_eq!(session.clipboard().paths().len(), 2);
        assert!(session.view().selection().is_empty());
        assert_eq!(session.status(), Some("Copied 2 items to clipboard"));
    }

    #[test]
    fn copy_on_parent_marker_is_refused() {
        let fs = sample_fs();
        let session = start(&fs).handle(Intent::Copy, &fs);
        assert!(session.clipboard().is_empty());
        assert_eq!(session.status(), Some("Cannot copy parent directory marker"));
    }

    #[test]
    fn paste_with_empty_clipboard() {
        let fs = sample_fs();
        let session = start(&fs).handle(Intent::Paste, &fs);
        assert!(fs.calls().is_empty());
        assert_eq!(session.status(), Some("Clipboard is empty"));
    }

    #[test]
    fn live_search_narrows_and_commit_reports_count() {
        let fs = sample_fs();
        let session = start(&fs).handle(Intent::Search, &fs);
        let session = type_text(session, "TXT", &fs);
        assert_eq!(names(&session), vec!["..", "a.txt", "c.txt"]);
        assert_eq!(session.frame().banner.as_deref(), Some("Search: TXT_"));

        let session = session.handle(Intent::Submit, &fs);
        assert!(session.dialog().is_none());
        assert_eq!(session.search(), Some("TXT"));
        assert_eq!(session.status(), Some("Search results: 2 items found for 'TXT'"));
        assert_eq!(session.frame().banner.as_deref(), Some("Search: 'TXT'"));
    }

    #[test]
    fn search_cancel_restores_filter() {
        let fs = sample_fs();
        let session = run(start(&fs), &[Intent::Filter], &fs);
        let session = type_text(session, "rs", &fs).handle(Intent::Submit, &fs);
        assert_eq!(session.filter(), Some("rs"));
        assert_eq!(session.status(), Some("Filtered by *.rs: 3 items"));

        let session = session.handle(Intent::Search, &fs);
        assert_eq!(session.filter(), None);
        let session = type_text(session, "a", &fs).handle(Intent::Esc, &fs);
        assert_eq!(session.filter(), Some("rs"));
        assert_eq!(session.search(), None);
        assert_eq!(names(&session), vec!["..", "docs", "music", "b.rs"]);
    }

    #[test]
    fn empty_search_submit_cancels() {
        let fs = sample_fs();
        let session = run(start(&fs), &[Intent::Search, Intent::Submit], &fs);
        assert_eq!(session.search(), None);
        assert_eq!(session.status(), Some("Search cancelled"));
    }

    #[test]
    fn search_keystrokes_clear_marks() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "a.txt", &fs).handle(Intent::Toggle, &fs);
        let session = type_text(session.handle(Intent::Search, &fs), "a", &fs);
        assert!(session.view().selection().is_empty());
        assert_eq!(session.view().cursor(), 0);
    }

    #[test]
    fn committed_search_is_dropped_on_directory_change() {
        let fs = sample_fs();
        let session = type_text(start(&fs).handle(Intent::Search, &fs), "doc", &fs);
        let session = run(session, &[Intent::Submit, Intent::Down, Intent::Open], &fs);
        assert_eq!(session.current_dir(), Path::new("/home/user/docs"));
        assert_eq!(session.search(), None);
    }

    #[test]
    fn filter_survives_directory_change_and_escape_clears() {
        let fs = sample_fs();
        let session = type_text(start(&fs).handle(Intent::Filter, &fs), ".pdf", &fs);
        let session = session.handle(Intent::Submit, &fs);
        assert_eq!(session.filter(), Some("pdf"));
        let session = cursor_to(session, "docs", &fs).handle(Intent::Open, &fs);
        assert_eq!(session.filter(), Some("pdf"));
        assert_eq!(names(&session), vec!["..", "report.pdf"]);

        let session = session.handle(Intent::Esc, &fs);
        assert_eq!(session.filter(), None);
        assert_eq!(session.status(), Some("Filter cleared"));
    }

    #[test]
    fn filter_cancel_restores_previous() {
        let fs = sample_fs();
        let session = type_text(start(&fs).handle(Intent::Filter, &fs), "zip", &fs);
        assert_eq!(names(&session), vec!["..", "docs", "music", "d.zip"]);
        let session = session.handle(Intent::Esc, &fs);
        assert_eq!(session.filter(), None);
        assert_eq!(names(&session).len(), 7);
        assert_eq!(session.status(), Some("Filter cancelled"));
    }

    #[test]
    fn escape_clears_marks_before_search() {
        let fs = sample_fs();
        let session = type_text(start(&fs).handle(Intent::Search, &fs), "t", &fs);
        let session = run(session, &[Intent::Submit, Intent::Down, Intent::Toggle], &fs);
        let session = session.handle(Intent::Esc, &fs);
        assert_eq!(session.status(), Some("Selection cleared"));
        assert_eq!(session.search(), Some("t"));

        let session = session.handle(Intent::Esc, &fs);
        assert_eq!(session.search(), None);
        assert_eq!(session.status(), Some("Search cleared"));
    }

    #[test]
    fn rename_rejects_duplicates_before_calling_fs() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "a.txt", &fs).handle(Intent::Rename, &fs);
        assert_eq!(session.dialog().and_then(Dialog::input), Some("a.txt"));

        let session = run(session, &[Intent::Backspace; 5], &fs);
        let session = type_text(session, "c.txt", &fs).handle(Intent::Submit, &fs);
        assert!(fs.calls().is_empty());
        assert_eq!(session.status(), Some("Name already exists: c.txt"));
        assert!(session.dialog().is_none());
    }

    #[test]
    fn rename_success_calls_fs() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "b.rs", &fs).handle(Intent::Rename, &fs);
        let session = type_text(session, "x", &fs).handle(Intent::Submit, &fs);
        assert_eq!(fs.calls(), vec!["rename b.rs -> b.rsx"]);
        assert_eq!(session.status(), Some("done"));
    }

    #[test]
    fn rename_with_marks_is_refused() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "a.txt", &fs);
        let session = run(session, &[Intent::Toggle, Intent::Rename], &fs);
        assert!(session.dialog().is_none());
        assert_eq!(
            session.status(),
            Some("Cannot rename multiple items at once. Select a single item.")
        );
    }

    #[test]
    fn rename_empty_is_rejected() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "b.rs", &fs).handle(Intent::Rename, &fs);
        let session = run(session, &[Intent::Backspace; 4], &fs).handle(Intent::Submit, &fs);
        assert!(fs.calls().is_empty());
        assert_eq!(session.status(), Some("Name cannot be empty"));
    }

    #[test]
    fn delete_asks_then_deletes() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "c.txt", &fs).handle(Intent::Delete, &fs);
        assert_eq!(
            session.dialog().map(Dialog::prompt).as_deref(),
            Some("Delete 'c.txt'? This cannot be undone!")
        );
        let session = session.handle(Intent::Char('y'), &fs);
        assert_eq!(fs.calls(), vec!["delete c.txt"]);
        assert!(session.dialog().is_none());
    }

    #[test]
    fn delete_declined() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "c.txt", &fs);
        let session = run(session, &[Intent::Delete, Intent::Down, Intent::Confirm(false)], &fs);
        assert!(fs.calls().is_empty());
        assert_eq!(session.status(), Some("Delete cancelled"));
    }

    #[test]
    fn delete_without_confirmation_when_disabled() {
        let fs = sample_fs();
        let mut config = Config::default();
        config.general.confirm_delete = false;
        let session = BrowserSession::open(PathBuf::from("/home/user"), &config, &fs);
        let session = cursor_to(session, "d.zip", &fs).handle(Intent::Delete, &fs);
        assert_eq!(fs.calls(), vec!["delete d.zip"]);
        assert!(session.dialog().is_none());
    }

    #[test]
    fn new_folder_validation() {
        let fs = sample_fs();
        let session = run(start(&fs), &[Intent::NewFolder, Intent::Submit], &fs);
        assert_eq!(session.status(), Some("Folder name cannot be empty"));

        let session = type_text(session.handle(Intent::NewFolder, &fs), "docs", &fs);
        let session = session.handle(Intent::Submit, &fs);
        assert_eq!(session.status(), Some("Folder already exists: docs"));
        assert!(fs.calls().is_empty());

        let session = type_text(session.handle(Intent::NewFolder, &fs), "new", &fs);
        session.handle(Intent::Submit, &fs);
        assert_eq!(fs.calls(), vec!["mkdir /home/user new"]);
    }

    #[test]
    fn new_file_asks_for_extension() {
        let fs = sample_fs();
        let session = type_text(start(&fs).handle(Intent::NewFile, &fs), "notes", &fs);
        let session = session.handle(Intent::Submit, &fs);
        assert_eq!(session.dialog().and_then(Dialog::input), Some("txt"));

        let session = run(session, &[Intent::Backspace; 3], &fs);
        let session = type_text(session, "m.d", &fs);
        assert_eq!(session.dialog().and_then(Dialog::input), Some("md"));
        session.handle(Intent::Submit, &fs);
        assert_eq!(fs.calls(), vec!["touch /home/user notes.md"]);
    }

    #[test]
    fn new_file_empty_extension_defaults() {
        let fs = sample_fs();
        let session = type_text(start(&fs).handle(Intent::NewFile, &fs), "todo", &fs);
        let session = run(session, &[Intent::Submit, Intent::Backspace, Intent::Backspace, Intent::Backspace], &fs);
        session.handle(Intent::Submit, &fs);
        assert_eq!(fs.calls(), vec!["touch /home/user todo.txt"]);
    }

    #[test]
    fn compress_flow_names_archive_after_source() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "b.rs", &fs).handle(Intent::Compress, &fs);
        let session = session.handle(Intent::Char('1'), &fs);
        assert_eq!(session.dialog().and_then(Dialog::input), Some("b"));
        session.handle(Intent::Submit, &fs);
        assert_eq!(fs.calls(), vec!["compress b.rs -> b.zip (zip)"]);
    }

    #[test]
    fn compress_rejects_existing_archive_name() {
        let fs = sample_fs();
        let session = run(start(&fs), &[Intent::SelectAll, Intent::Compress, Intent::Submit], &fs);
        assert_eq!(session.dialog().and_then(Dialog::input), Some("archive"));
        let session = run(session, &[Intent::Backspace; 7], &fs);
        let session = type_text(session, "d", &fs).handle(Intent::Submit, &fs);
        assert!(fs.calls().is_empty());
        assert_eq!(session.status(), Some("Item already exists: d.zip"));
    }

    #[test]
    fn extract_requires_archive() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "a.txt", &fs).handle(Intent::Extract, &fs);
        assert_eq!(session.status(), Some("Not an archive: a.txt"));

        let session = cursor_to(start(&fs), "d.zip", &fs).handle(Intent::Extract, &fs);
        assert_eq!(fs.calls(), vec!["extract d.zip -> /home/user"]);
        assert_eq!(session.status(), Some("done"));
    }

    #[test]
    fn status_is_cleared_by_next_intent_but_not_by_resize() {
        let fs = sample_fs();
        let session = start(&fs).handle(Intent::Refresh, &fs);
        assert_eq!(session.status(), Some("Refreshed"));
        let session = session.handle(Intent::Resize { cols: 100, rows: 40 }, &fs);
        assert_eq!(session.status(), Some("Refreshed"));
        let session = session.handle(Intent::Down, &fs);
        assert_eq!(session.status(), None);
    }

    #[test]
    fn quit_sets_flag() {
        let fs = sample_fs();
        assert!(start(&fs).handle(Intent::Quit, &fs).should_quit());
    }

    #[test]
    fn frame_shows_current_page_only() {
        let files: Vec<String> = (0..20).map(|i| format!("f{i:02}")).collect();
        let refs: Vec<&str> = files.iter().map(String::as_str).collect();
        let fs = FakeFs::new().with_dir("/", &[], &refs);
        let session = BrowserSession::open(PathBuf::from("/"), &Config::default(), &fs)
            .with_terminal_size(80, 14);

        // 14 rows - 8 chrome - 1 page line = 5 rows per page.
        let frame = session.frame();
        assert!(frame.chrome.page);
        assert_eq!(frame.layout.rows_per_page, 5);
        assert_eq!(frame.layout.total_pages, 4);
        assert_eq!(frame.page_items.len(), 5);
        assert_eq!(frame.layout_summary, "1 cols · page 1/4");

        let session = session.handle(Intent::PageDown, &fs);
        let frame = session.frame();
        assert_eq!(frame.page, 1);
        assert_eq!(frame.selected_index, 5);
        assert_eq!(frame.cursor_item().map(|i| i.entry.name()), Some("f05"));
    }

    #[test]
    fn page_down_on_last_page_returns_to_its_start() {
        let files: Vec<String> = (0..20).map(|i| format!("f{i:02}")).collect();
        let refs: Vec<&str> = files.iter().map(String::as_str).collect();
        let fs = FakeFs::new().with_dir("/", &[], &refs);
        let session = BrowserSession::open(PathBuf::from("/"), &Config::default(), &fs)
            .with_terminal_size(80, 14);

        // 5 rows per page, the last page holds f15 to f19.
        let session = run(session, &[Intent::PageDown; 4], &fs);
        assert_eq!(session.frame().selected_index, 15);
        let session = run(session, &[Intent::Down, Intent::Down, Intent::PageDown], &fs);
        assert_eq!(session.frame().selected_index, 15);
        assert_eq!(session.frame().page, 3);
    }

    #[test]
    fn frame_marks_and_clipboard_summary() {
        let fs = sample_fs();
        let session = cursor_to(start(&fs), "a.txt", &fs);
        let session = run(session, &[Intent::Cut, Intent::Toggle], &fs);
        let frame = session.frame();
        assert_eq!(frame.marked_count, 1);
        assert_eq!(frame.clipboard_summary.as_deref(), Some("Cut: a.txt"));
        assert!(frame.chrome.clipboard);
        assert!(frame.page_items.iter().any(|i| i.is_marked && i.entry.name() == "a.txt"));
    }

    #[test]
    fn local_filesystem_round_trip() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("one.txt"), "1").unwrap();
        let local = LocalFileSystem::default();

        let session = BrowserSession::open(tmp.path().to_path_buf(), &Config::default(), &local);
        assert_eq!(names(&session), vec!["..", "sub", "one.txt"]);

        let session = session.handle(Intent::Down, &local).handle(Intent::Down, &local);
        let session = session.handle(Intent::Copy, &local);
        let session = session.handle(Intent::Up, &local).handle(Intent::Open, &local);
        let session = session.handle(Intent::Paste, &local);
        assert!(tmp.path().join("sub/one.txt").exists());
        assert_eq!(session.status(), Some("Copied to one.txt"));
        assert!(!session.clipboard().is_empty());

        let session = session.handle(Intent::Back, &local).handle(Intent::NewFolder, &local);
        let session = "made"
            .chars()
            .fold(session, |s, c| s.handle(Intent::Char(c), &local))
            .handle(Intent::Submit, &local);
        assert!(tmp.path().join("made").is_dir());
        assert_eq!(session.view().selected_entry().map(Entry::name), Some("made"));
    }

    #[test]
    fn relative_start_dir_can_go_up() {
        let local = LocalFileSystem::default();
        let cwd = fs::canonicalize(std::env::current_dir().unwrap()).unwrap();

        let session = BrowserSession::open(PathBuf::from("."), &Config::default(), &local);
        assert!(session.current_dir().is_absolute());
        assert_eq!(session.current_dir(), cwd.as_path());

        let session = session.handle(Intent::Back, &local);
        match cwd.parent() {
            Some(parent) => {
                assert_eq!(session.current_dir(), parent);
                assert_eq!(session.status(), Some("Moved to parent directory"));
            }
            None => assert_eq!(session.status(), Some("Already at root directory")),
        }
    }

    #[test]
    fn local_compress_then_extract() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("data.txt"), "payload").unwrap();
        let local = LocalFileSystem::default();

        let session = BrowserSession::open(tmp.path().to_path_buf(), &Config::default(), &local);
        let session = session.handle(Intent::Down, &local).handle(Intent::Compress, &local);
        let session = session.handle(Intent::Submit, &local).handle(Intent::Submit, &local);
        assert!(tmp.path().join("data.zip").is_file());
        assert_eq!(session.view().selected_entry().map(Entry::name), Some("data.zip"));

        fs::remove_file(tmp.path().join("data.txt")).unwrap();
        let session = session.handle(Intent::Extract, &local);
        assert_eq!(fs::read_to_string(tmp.path().join("data.txt")).unwrap(), "payload");
        assert!(session.status().is_some_and(|s| s.starts_with("Successfully extracted")));
    }
}
