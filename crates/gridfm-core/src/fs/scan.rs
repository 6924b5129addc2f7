//! Directory listing.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::Entry;

/// Message shown in place of a listing the process may not read.
pub const PERMISSION_DENIED: &str = "Permission Denied";

/// Returns `true` if `path` has no parent (a filesystem root).
pub fn is_root(path: &Path) -> bool {
    path.parent().is_none()
}

/// Reads the immediate children of `path`, folders first then by
/// case-insensitive name, with ".." prepended unless `path` is a root.
///
/// Children that vanish or cannot be stat'ed mid-scan are skipped.
///
/// # Errors
///
/// - [`CoreError::NotFound`]: the path does not exist.
/// - [`CoreError::NotADirectory`]: the path is not a directory.
/// - [`CoreError::PermissionDenied`]: read access is denied.
/// - [`CoreError::Io`]: any other I/O error.
///
/// # Examples
///
/// ```no_run
/// use gridfm_core::fs::scan::read_directory;
/// use std::path::Path;
///
/// let entries = read_directory(Path::new("/home/user"), "%Y-%m-%d %H:%M").unwrap();
/// for entry in &entries {
///     println!("{}", entry.name());
/// }
/// ```
pub fn read_directory(path: &Path, date_format: &str) -> CoreResult<Vec<Entry>> {
    if !path.exists() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::from_io(e, path))?;

    let mut children = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        // Follows symlinks so a link to a directory lists as a directory.
        let metadata = match std::fs::metadata(dir_entry.path()) {
            Ok(m) => m,
            Err(_) => continue,
        };
        children.push(Entry::from_metadata(dir_entry.path(), &metadata, date_format));
    }

    children.sort_by(|a, b| {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
    });

    let mut entries = Vec::with_capacity(children.len() + 1);
    if !is_root(path) {
        entries.extend(path.parent().map(|p| Entry::parent(p.to_path_buf())));
    }
    entries.extend(children);

    debug!(path = %path.display(), count = entries.len(), "scanned directory");
    Ok(entries)
}

/// Total variant of [`read_directory`] used by the browser.
///
/// Failures never propagate: a permission error on the directory itself
/// becomes a single [`PERMISSION_DENIED`] placeholder, any other failure a
/// single `"Error: …"` placeholder.
pub fn scan_directory(path: &Path, date_format: &str) -> Vec<Entry> {
    match read_directory(path, date_format) {
        Ok(entries) => entries,
        Err(CoreError::PermissionDenied(_)) => {
            warn!(path = %path.display(), "permission denied while scanning");
            vec![Entry::error(PERMISSION_DENIED)]
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "scan failed");
            vec![Entry::error(format!("Error: {e}"))]
        }
    }
}

/// Checks that `path` can be entered.
///
/// # Errors
///
/// - [`CoreError::NotFound`]: the path does not exist.
/// - [`CoreError::NotADirectory`]: the path is not a directory.
pub fn ensure_directory(path: &Path) -> CoreResult<()> {
    if !path.exists() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Resolves `path` to an absolute directory path.
///
/// Symlinks and `.`/`..` are resolved when the path exists. Otherwise a
/// relative path is joined onto the working directory.
pub fn absolute_directory(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "working directory unavailable");
            path.to_path_buf()
        }
    }
}
