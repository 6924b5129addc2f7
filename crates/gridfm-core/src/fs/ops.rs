//! File operations.
//!
//! Each operation comes in two layers: a strict `CoreResult` function that
//! does the filesystem work, and an [`OpOutcome`]-returning wrapper that
//! turns the result into the one-line message the browser shows.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};

/// Result of a file operation as reported to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpOutcome {
    pub success: bool,
    pub message: String,
}

impl OpOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Symlinked directory trees deeper than this are refused.
const MAX_COPY_DEPTH: usize = 64;

/// Validates a bare file or directory name.
///
/// # Errors
///
/// [`CoreError::InvalidName`] for empty names, `.`/`..`, or names containing
/// a path separator or NUL.
pub fn validate_name(name: &str) -> CoreResult<()> {
    let bad = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\0')
        || (cfg!(windows) && (name.contains('\\') || name.contains(':')));
    if bad {
        return Err(CoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Copies a file, symlink or directory tree from `src` to `dest`.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::Io`] for any I/O failure during copy.
pub fn copy_path(src: &Path, dest: &Path) -> CoreResult<()> {
    copy_node(src, dest, 0)
}

fn copy_node(src: &Path, dest: &Path, depth: usize) -> CoreResult<()> {
    if depth > MAX_COPY_DEPTH {
        return Err(CoreError::Io(std::io::Error::other(format!(
            "directory nesting deeper than {MAX_COPY_DEPTH} levels"
        ))));
    }

    let meta = std::fs::symlink_metadata(src).map_err(|e| CoreError::from_io(e, src))?;
    let file_type = meta.file_type();

    if file_type.is_symlink() {
        copy_symlink(src, dest)
    } else if file_type.is_dir() {
        // List before creating `dest`, so a destination inside `src` is
        // never part of its own listing.
        let children = std::fs::read_dir(src)?.collect::<Result<Vec<_>, _>>()?;
        std::fs::create_dir(dest).map_err(|e| CoreError::from_io(e, dest))?;
        for child in children {
            copy_node(&child.path(), &dest.join(child.file_name()), depth + 1)?;
        }
        Ok(())
    } else {
        std::fs::copy(src, dest)?;
        Ok(())
    }
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> CoreResult<()> {
    let target = std::fs::read_link(src)?;
    std::os::unix::fs::symlink(target, dest)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dest: &Path) -> CoreResult<()> {
    std::fs::copy(src, dest)?;
    Ok(())
}

/// Moves `src` to `dest`, falling back to copy + delete across devices.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::AlreadyExists`] if `dest` exists.
/// - [`CoreError::Io`] for any I/O failure.
pub fn move_path(src: &Path, dest: &Path) -> CoreResult<()> {
    std::fs::symlink_metadata(src).map_err(|e| CoreError::from_io(e, src))?;
    if dest.symlink_metadata().is_ok() {
        return Err(CoreError::AlreadyExists(dest.to_path_buf()));
    }

    if std::fs::rename(src, dest).is_err() {
        if let Err(e) = copy_path(src, dest) {
            discard_partial(dest);
            return Err(e);
        }
        delete_path(src)?;
    }
    Ok(())
}

/// Removes whatever a failed copy left at `dest`.
fn discard_partial(dest: &Path) {
    if dest.symlink_metadata().is_ok() {
        if let Err(e) = delete_path(dest) {
            warn!(path = %dest.display(), error = %e, "could not remove partial copy");
        }
    }
}

/// Returns `true` when `dest_dir` is the directory `src` or lies inside it.
///
/// Symlinked sources are copied as links, so they never nest.
pub fn nests_inside(src: &Path, dest_dir: &Path) -> bool {
    if src.is_symlink() || !src.is_dir() {
        return false;
    }
    match (std::fs::canonicalize(src), std::fs::canonicalize(dest_dir)) {
        (Ok(src), Ok(dest)) => dest.starts_with(src),
        _ => false,
    }
}

/// Deletes a file, symlink or directory tree. Symlinks are never followed.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::Io`] for any I/O failure during deletion.
pub fn delete_path(path: &Path) -> CoreResult<()> {
    let meta = std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(e, path))?;
    if meta.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Renames `path` within its parent directory and returns the new path.
///
/// # Errors
///
/// - [`CoreError::InvalidName`] if `new_name` is not a bare name.
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::AlreadyExists`] if the target name is taken.
pub fn rename_path(path: &Path, new_name: &str) -> CoreResult<PathBuf> {
    validate_name(new_name)?;
    std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(e, path))?;

    let target = path
        .parent()
        .map(|p| p.join(new_name))
        .unwrap_or_else(|| PathBuf::from(new_name));
    if target.symlink_metadata().is_ok() {
        return Err(CoreError::AlreadyExists(target));
    }

    std::fs::rename(path, &target)?;
    Ok(target)
}

/// Picks `{name}_copy{n}` (directories) or `{stem}_copy{n}{.ext}` (files)
/// inside `dest_dir`, starting at `n = 1`, unless `name` itself is free.
pub fn unique_copy_target(dest_dir: &Path, name: &str, is_dir: bool) -> PathBuf {
    let first = dest_dir.join(name);
    if first.symlink_metadata().is_err() {
        return first;
    }

    let as_path = Path::new(name);
    let (stem, suffix) = match (is_dir, as_path.file_stem(), as_path.extension()) {
        (false, Some(stem), Some(ext)) => (
            stem.to_string_lossy().into_owned(),
            format!(".{}", ext.to_string_lossy()),
        ),
        _ => (name.to_string(), String::new()),
    };

    (1..)
        .map(|n| dest_dir.join(format!("{stem}_copy{n}{suffix}")))
        .find(|candidate| candidate.symlink_metadata().is_err())
        .unwrap_or(first)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

// ===== Browser-facing operations =====

/// Copies `src` into `dest_dir`, renaming on collision.
pub fn copy_item(src: &Path, dest_dir: &Path) -> OpOutcome {
    if nests_inside(src, dest_dir) {
        return OpOutcome::failed("Cannot copy a folder into itself");
    }
    let name = file_name_of(src);
    let is_dir = src.is_dir() && !src.is_symlink();
    let target = unique_copy_target(dest_dir, &name, is_dir);

    match copy_path(src, &target) {
        Ok(()) => {
            debug!(from = %src.display(), to = %target.display(), "copied");
            OpOutcome::ok(format!("Copied to {}", file_name_of(&target)))
        }
        Err(e) => {
            warn!(from = %src.display(), error = %e, "copy failed");
            discard_partial(&target);
            OpOutcome::failed(format!("Copy failed: {e}"))
        }
    }
}

/// Moves `src` into `dest_dir`; an existing target is refused.
pub fn move_item(src: &Path, dest_dir: &Path) -> OpOutcome {
    if nests_inside(src, dest_dir) {
        return OpOutcome::failed("Cannot move a folder into itself");
    }
    let name = file_name_of(src);
    let target = dest_dir.join(&name);
    if target.symlink_metadata().is_ok() {
        return OpOutcome::failed(format!("Item already exists: {name}"));
    }

    match move_path(src, &target) {
        Ok(()) => {
            debug!(from = %src.display(), to = %target.display(), "moved");
            OpOutcome::ok(format!("Moved to {name}"))
        }
        Err(e) => {
            warn!(from = %src.display(), error = %e, "move failed");
            OpOutcome::failed(format!("Move failed: {e}"))
        }
    }
}

pub fn delete_item(path: &Path) -> OpOutcome {
    match delete_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "deleted");
            OpOutcome::ok("Deleted successfully")
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "delete failed");
            OpOutcome::failed(format!("Delete failed: {e}"))
        }
    }
}

pub fn rename_item(path: &Path, new_name: &str) -> OpOutcome {
    match rename_path(path, new_name) {
        Ok(_) => OpOutcome::ok(format!("Renamed to {new_name}")),
        Err(CoreError::AlreadyExists(_)) => {
            OpOutcome::failed(format!("Name already exists: {new_name}"))
        }
        Err(e) => OpOutcome::failed(format!("Rename failed: {e}")),
    }
}

pub fn create_folder(parent: &Path, name: &str) -> OpOutcome {
    if let Err(e) = validate_name(name) {
        return OpOutcome::failed(format!("Create folder failed: {e}"));
    }
    let target = parent.join(name);
    if target.symlink_metadata().is_ok() {
        return OpOutcome::failed(format!("Folder already exists: {name}"));
    }
    match std::fs::create_dir_all(&target) {
        Ok(()) => OpOutcome::ok(format!("Created folder: {name}")),
        Err(e) => OpOutcome::failed(format!("Create folder failed: {e}")),
    }
}

pub fn create_file(parent: &Path, name: &str) -> OpOutcome {
    if let Err(e) = validate_name(name) {
        return OpOutcome::failed(format!("Create file failed: {e}"));
    }
    let target = parent.join(name);
    let created = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target);
    match created {
        Ok(_) => OpOutcome::ok(format!("Created file: {name}")),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            OpOutcome::failed(format!("File already exists: {name}"))
        }
        Err(e) => OpOutcome::failed(format!("Create file failed: {e}")),
    }
}

/// Runs `op` over every path and folds the results.
///
/// One path behaves exactly like the single-item operation. Several paths
/// always succeed as a batch; failures are listed by name in the message.
fn batch(paths: &[PathBuf], past_tense: &str, op: impl Fn(&Path) -> OpOutcome) -> OpOutcome {
    if let [only] = paths {
        return op(only);
    }

    let mut done = 0usize;
    let mut failed = Vec::new();
    for path in paths {
        if op(path).success {
            done += 1;
        } else {
            failed.push(file_name_of(path));
        }
    }

    if failed.is_empty() {
        OpOutcome::ok(format!("Successfully {past_tense} {done} items"))
    } else {
        let capitalised = capitalise(past_tense);
        OpOutcome::ok(format!(
            "{capitalised} {done} items. Failed: {}",
            failed.join(", ")
        ))
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn copy_items(paths: &[PathBuf], dest_dir: &Path) -> OpOutcome {
    batch(paths, "copied", |p| copy_item(p, dest_dir))
}

pub fn move_items(paths: &[PathBuf], dest_dir: &Path) -> OpOutcome {
    batch(paths, "moved", |p| move_item(p, dest_dir))
}

pub fn delete_items(paths: &[PathBuf]) -> OpOutcome {
    batch(paths, "deleted", delete_item)
}

/// Opens `path` with the OS default handler.
pub fn open_path(path: &Path) -> bool {
    match open::that(path) {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "open failed");
            false
        }
    }
}
