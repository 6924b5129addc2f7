//! Copy/cut staging between directories.

use std::path::{Path, PathBuf};

/// Whether a paste copies or moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardMode {
    Copy,
    Cut,
}

impl ClipboardMode {
    pub fn label(self) -> &'static str {
        match self {
            ClipboardMode::Copy => "Copy",
            ClipboardMode::Cut => "Cut",
        }
    }
}

/// A paste the browser asks the filesystem to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteRequest {
    pub mode: ClipboardMode,
    pub paths: Vec<PathBuf>,
    pub destination: PathBuf,
}

/// Staged absolute paths. Independent of the current directory and listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardState {
    staged: Option<(ClipboardMode, Vec<PathBuf>)>,
}

impl ClipboardState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replaces the contents with `paths` to be copied.
    pub fn copy(paths: Vec<PathBuf>) -> Self {
        Self::staged(ClipboardMode::Copy, paths)
    }

    /// Replaces the contents with `paths` to be moved.
    pub fn cut(paths: Vec<PathBuf>) -> Self {
        Self::staged(ClipboardMode::Cut, paths)
    }

    fn staged(mode: ClipboardMode, paths: Vec<PathBuf>) -> Self {
        if paths.is_empty() {
            return Self::empty();
        }
        Self {
            staged: Some((mode, paths)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_none()
    }

    pub fn mode(&self) -> Option<ClipboardMode> {
        self.staged.as_ref().map(|(mode, _)| *mode)
    }

    pub fn paths(&self) -> &[PathBuf] {
        self.staged
            .as_ref()
            .map(|(_, paths)| paths.as_slice())
            .unwrap_or(&[])
    }

    /// The paste to perform into `destination`, if anything is staged.
    pub fn paste_request(&self, destination: &Path) -> Option<PasteRequest> {
        self.staged.as_ref().map(|(mode, paths)| PasteRequest {
            mode: *mode,
            paths: paths.clone(),
            destination: destination.to_path_buf(),
        })
    }

    /// Clipboard after a paste finished.
    ///
    /// A successful cut empties it; a copy, or any failure, keeps it so the
    /// paste can be repeated or retried.
    pub fn after_paste(self, success: bool) -> Self {
        match self.mode() {
            Some(ClipboardMode::Cut) if success => Self::empty(),
            _ => self,
        }
    }

    /// Banner text such as `"Copy: report.pdf"` or `"Cut: 3 items"`.
    pub fn summary(&self) -> Option<String> {
        let (mode, paths) = self.staged.as_ref()?;
        let what = match paths.as_slice() {
            [only] => only
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| only.display().to_string()),
            many => format!("{} items", many.len()),
        };
        Some(format!("{}: {what}", mode.label()))
    }
}
