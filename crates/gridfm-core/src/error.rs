//! Error types for `gridfm-core`.
//!
//! Low-level filesystem and archive functions return [`CoreResult<T>`].
//! The session layer never lets a [`CoreError`] escape: every failure is
//! turned into a status message before the next frame is produced.

use std::path::PathBuf;

/// Unified error type for all core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The destination of a create/rename/move already exists.
    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),

    /// A file or directory name is invalid (empty, contains path separators, etc.).
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Reading or writing a ZIP archive failed.
    #[error("archive error: {0}")]
    Archive(String),

    /// An external archiver exited unsuccessfully or could not be spawned.
    #[error("{tool} failed: {reason}")]
    ExternalTool { tool: String, reason: String },

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for CoreError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => CoreError::Io(e),
            other => CoreError::Archive(other.to_string()),
        }
    }
}

impl CoreError {
    /// Maps an `io::Error` raised while touching `path` to the most specific variant.
    pub fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => CoreError::AlreadyExists(path.to_path_buf()),
            _ => CoreError::Io(err),
        }
    }
}

/// Convenience alias used throughout `gridfm-core`.
pub type CoreResult<T> = Result<T, CoreError>;
