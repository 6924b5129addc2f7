//! gridfm core library: the UI-agnostic browsing engine.
//!
//! `gridfm-core` turns a raw directory listing into a sorted, filtered,
//! paginated multi-column grid and resolves every decoded keystroke into
//! the next immutable [`BrowserSession`]. Frontends only decode input and
//! draw the [`ViewFrame`] they are handed.
//!
//! # Modules
//!
//! - [`fs`]: [`Entry`], directory scanning, file operations, archives, and the [`FileSystem`] seam.
//! - [`nav`]: sorting, filtering, grid geometry, cursor movement, selection and clipboard.
//! - [`session`]: the [`BrowserSession`] state machine, [`Intent`], dialogs and [`ViewFrame`].
//! - [`config`]: TOML settings and colour theme.
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod config;
pub mod error;
pub mod fs;
pub mod nav;
pub mod session;

pub use error::{CoreError, CoreResult};
pub use fs::entry::Entry;
pub use fs::ops::OpOutcome;
pub use fs::{ArchiveFormat, FileSystem, LocalFileSystem};
pub use nav::clipboard::{ClipboardMode, ClipboardState};
pub use nav::grid::{ChromeLines, GridLayout};
pub use nav::navigator::{navigate, Movement};
pub use nav::selection::SelectionSet;
pub use nav::sort::{sort_entries, SortMode, SortSpec};
pub use nav::view::{ItemView, ViewMode};
pub use session::{BrowserSession, Dialog, FrameItem, Intent, ViewFrame};

pub use config::settings::Config;
pub use config::theme::{parse_color, Theme};

/// Normalises a string to NFC (composed) form.
///
/// macOS stores filenames decomposed (NFD), so accented and Hangul names
/// would otherwise compare and render as separate code points.
pub fn nfc_string(s: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    s.nfc().collect()
}
