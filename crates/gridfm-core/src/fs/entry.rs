//! Entry representation.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Name of the synthetic entry that leads to the parent directory.
pub const PARENT_NAME: &str = "..";

/// Display string used when size or modification time cannot be read.
pub const UNAVAILABLE: &str = "N/A";

/// One filesystem node as the browser sees it.
///
/// Sizes and times are stored as display strings: the browser never does
/// arithmetic on them except when sorting by size, which parses the string
/// back (see [`crate::nav::sort::parse_size_display`]). Directories carry
/// empty size and time strings.
///
/// `Entry` is immutable; listings are rebuilt rather than edited.
///
/// # Examples
///
/// ```
/// use gridfm_core::Entry;
/// use std::path::PathBuf;
///
/// let up = Entry::parent(PathBuf::from("/home"));
/// assert!(up.is_parent());
/// assert!(up.is_dir());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    is_dir: bool,
    size_display: String,
    modified_display: String,
    path: PathBuf,
}

impl Entry {
    /// The ".." sentinel pointing at `parent`.
    pub fn parent(parent: PathBuf) -> Self {
        Self {
            name: PARENT_NAME.to_string(),
            is_dir: true,
            size_display: String::new(),
            modified_display: String::new(),
            path: parent,
        }
    }

    /// A directory entry. Directories never show size or time.
    pub fn directory(path: PathBuf) -> Self {
        Self {
            name: display_name(&path),
            is_dir: true,
            size_display: String::new(),
            modified_display: String::new(),
            path,
        }
    }

    /// A file entry with pre-rendered size and time strings.
    pub fn file(path: PathBuf, size_display: String, modified_display: String) -> Self {
        Self {
            name: display_name(&path),
            is_dir: false,
            size_display,
            modified_display,
            path,
        }
    }

    /// Builds an entry from `metadata`, rendering the time with `date_format`.
    pub fn from_metadata(path: PathBuf, metadata: &std::fs::Metadata, date_format: &str) -> Self {
        if metadata.is_dir() {
            return Self::directory(path);
        }
        let modified = metadata
            .modified()
            .map(|t| format_modified(t, date_format))
            .unwrap_or_else(|_| UNAVAILABLE.to_string());
        Self::file(path, format_size(metadata.len()), modified)
    }

    /// A placeholder that reports a listing failure in place of the listing.
    ///
    /// Placeholders have an empty path and cannot be opened or operated on.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            name: message.into(),
            is_dir: false,
            size_display: String::new(),
            modified_display: String::new(),
            path: PathBuf::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn size_display(&self) -> &str {
        &self.size_display
    }

    pub fn modified_display(&self) -> &str {
        &self.modified_display
    }

    /// Absolute path of the node (the parent directory for "..").
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` for the ".." sentinel.
    pub fn is_parent(&self) -> bool {
        self.name == PARENT_NAME
    }

    /// Returns `true` for a synthetic error entry.
    pub fn is_placeholder(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    /// Returns `true` if the entry may be marked, copied, renamed or deleted.
    pub fn is_actionable(&self) -> bool {
        !self.is_parent() && !self.is_placeholder()
    }

    /// Lowercased extension including the leading dot, or an empty string.
    pub fn extension_lower(&self) -> String {
        Path::new(&self.name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| crate::nfc_string(&n.to_string_lossy()))
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Renders a byte count as `"{value:.1} {unit}"`, stepping by 1024.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} PB")
}

/// Renders a modification time in local time.
///
/// An invalid `date_format` yields [`UNAVAILABLE`] instead of panicking.
pub fn format_modified(time: SystemTime, date_format: &str) -> String {
    let local: chrono::DateTime<chrono::Local> = time.into();
    let mut out = String::new();
    match write!(out, "{}", local.format(date_format)) {
        Ok(()) => out,
        Err(_) => UNAVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    #[test]
    fn from_metadata_regular_file() {
        let tmp = TempDir::new().unwrap();
        let file_path = tmp.path().join("notes.txt");
        fs::write(&file_path, "hello").unwrap();

        let metadata = fs::metadata(&file_path).unwrap();
        let entry = Entry::from_metadata(file_path.clone(), &metadata, "%Y-%m-%d %H:%M");

        assert_eq!(entry.name(), "notes.txt");
        assert!(!entry.is_dir());
        assert_eq!(entry.size_display(), "5.0 B");
        assert_eq!(entry.modified_display().len(), "2024-01-01 00:00".len());
        assert_eq!(entry.path(), file_path);
        assert!(entry.is_actionable());
    }

    #[test]
    fn from_metadata_directory_has_blank_columns() {
        let tmp = TempDir::new().unwrap();
        let dir_path = tmp.path().join("photos");
        fs::create_dir(&dir_path).unwrap();

        let metadata = fs::metadata(&dir_path).unwrap();
        let entry = Entry::from_metadata(dir_path, &metadata, "%Y");

        assert!(entry.is_dir());
        assert_eq!(entry.size_display(), "");
        assert_eq!(entry.modified_display(), "");
    }

    #[test]
    fn unicode_name_is_nfc() {
        // "한" in decomposed form
        let decomposed = "\u{1112}\u{1161}\u{11ab}.txt";
        let entry = Entry::file(PathBuf::from(decomposed), String::new(), String::new());
        assert_eq!(entry.name(), "한.txt");
    }

    #[test]
    fn parent_sentinel() {
        let entry = Entry::parent(PathBuf::from("/usr"));
        assert!(entry.is_parent());
        assert!(entry.is_dir());
        assert!(!entry.is_actionable());
        assert_eq!(entry.path(), Path::new("/usr"));
    }

    #[test]
    fn error_placeholder() {
        let entry = Entry::error("Permission Denied");
        assert_eq!(entry.name(), "Permission Denied");
        assert!(entry.is_placeholder());
        assert!(!entry.is_dir());
        assert!(!entry.is_actionable());
    }

    #[test]
    fn extension_lower_handles_case_and_missing() {
        let e = Entry::file(PathBuf::from("/a/Photo.JPG"), String::new(), String::new());
        assert_eq!(e.extension_lower(), ".jpg");
        let e = Entry::file(PathBuf::from("/a/Makefile"), String::new(), String::new());
        assert_eq!(e.extension_lower(), "");
    }

    // ===== format_size tests =====

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(0), "0.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.0 GB");
        assert_eq!(format_size(2 * 1024u64.pow(4)), "2.0 TB");
        assert_eq!(format_size(1024u64.pow(5)), "1.0 PB");
    }

    // ===== format_modified tests =====

    #[test]
    fn format_modified_uses_pattern() {
        let t = UNIX_EPOCH + Duration::from_secs(86_400 * 400);
        let year = format_modified(t, "%Y");
        assert!(year == "1971" || year == "1970", "got {year}");
    }

    #[test]
    fn format_modified_invalid_pattern_is_unavailable() {
        assert_eq!(format_modified(SystemTime::now(), "%Q%"), UNAVAILABLE);
    }
}
