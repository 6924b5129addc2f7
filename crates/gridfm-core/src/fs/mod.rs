//! File system access for gridfm.
//!
//! [`entry::Entry`] models one listed node, [`scan`] produces listings,
//! [`ops`] and [`archive`] perform mutations. The browser reaches all of
//! them through the [`FileSystem`] trait so it can be driven without a disk.

pub mod archive;
pub mod entry;
pub mod ops;
pub mod scan;

use std::path::{Path, PathBuf};

pub use archive::ArchiveFormat;
pub use entry::Entry;
pub use ops::OpOutcome;

/// Everything the browser asks of the outside world.
///
/// Listing is total (see [`scan::scan_directory`]) and every mutation
/// reports an [`OpOutcome`] instead of an error.
pub trait FileSystem {
    /// Lists `dir` with ".." first unless `dir` is a root.
    fn scan(&self, dir: &Path) -> Vec<Entry>;

    /// Returns `true` if `path` is an enterable directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Turns a start path into the absolute form the browser walks.
    fn resolve(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }

    fn copy_items(&self, sources: &[PathBuf], dest_dir: &Path) -> OpOutcome;
    fn move_items(&self, sources: &[PathBuf], dest_dir: &Path) -> OpOutcome;
    fn delete_items(&self, paths: &[PathBuf]) -> OpOutcome;
    fn rename(&self, path: &Path, new_name: &str) -> OpOutcome;
    fn create_folder(&self, parent: &Path, name: &str) -> OpOutcome;
    fn create_file(&self, parent: &Path, name: &str) -> OpOutcome;

    /// Hands `path` to the OS default application.
    fn open(&self, path: &Path) -> bool;

    fn compress(&self, sources: &[PathBuf], output: &Path, format: ArchiveFormat) -> OpOutcome;
    fn extract(&self, archive: &Path, dest_dir: &Path) -> OpOutcome;
}

/// [`FileSystem`] backed by the real disk.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    date_format: String,
}

impl LocalFileSystem {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }
}

impl Default for LocalFileSystem {
    fn default() -> Self {
        Self::new(crate::config::settings::DEFAULT_DATE_FORMAT)
    }
}

impl FileSystem for LocalFileSystem {
    fn scan(&self, dir: &Path) -> Vec<Entry> {
        scan::scan_directory(dir, &self.date_format)
    }

    fn is_dir(&self, path: &Path) -> bool {
        scan::ensure_directory(path).is_ok()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        scan::absolute_directory(path)
    }

    fn copy_items(&self, sources: &[PathBuf], dest_dir: &Path) -> OpOutcome {
        ops::copy_items(sources, dest_dir)
    }

    fn move_items(&self, sources: &[PathBuf], dest_dir: &Path) -> OpOutcome {
        ops::move_items(sources, dest_dir)
    }

    fn delete_items(&self, paths: &[PathBuf]) -> OpOutcome {
        ops::delete_items(paths)
    }

    fn rename(&self, path: &Path, new_name: &str) -> OpOutcome {
        ops::rename_item(path, new_name)
    }

    fn create_folder(&self, parent: &Path, name: &str) -> OpOutcome {
        ops::create_folder(parent, name)
    }

    fn create_file(&self, parent: &Path, name: &str) -> OpOutcome {
        ops::create_file(parent, name)
    }

    fn open(&self, path: &Path) -> bool {
        ops::open_path(path)
    }

    fn compress(&self, sources: &[PathBuf], output: &Path, format: ArchiveFormat) -> OpOutcome {
        archive::compress(sources, output, format)
    }

    fn extract(&self, archive: &Path, dest_dir: &Path) -> OpOutcome {
        archive::extract(archive, dest_dir)
    }
}
