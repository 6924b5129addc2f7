//! Archive compression and extraction.
//!
//! ZIP is handled in-process with the `zip` crate. 7Z and RAR shell out to
//! `7z`, `rar` and `unrar`, which must be on `PATH`.

use std::fs::File;
use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::fs::ops::OpOutcome;

const ARCHIVE_SUFFIXES: [&str; 10] = [
    ".zip", ".rar", ".7z", ".tar", ".gz", ".bz2", ".xz", ".tar.gz", ".tar.bz2", ".tar.xz",
];

/// Returns `true` if `name` ends with a known archive suffix (case-insensitive).
pub fn is_archive(name: &str) -> bool {
    let lower = name.to_lowercase();
    ARCHIVE_SUFFIXES.iter().any(|s| lower.ends_with(s))
}

/// Output format offered when compressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    SevenZip,
    Rar,
}

impl ArchiveFormat {
    pub const ALL: [ArchiveFormat; 3] = [
        ArchiveFormat::Zip,
        ArchiveFormat::SevenZip,
        ArchiveFormat::Rar,
    ];

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::SevenZip => "7z",
            ArchiveFormat::Rar => "rar",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "ZIP  (built-in)",
            ArchiveFormat::SevenZip => "7Z   (requires 7z)",
            ArchiveFormat::Rar => "RAR  (requires rar)",
        }
    }

    fn short(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "ZIP",
            ArchiveFormat::SevenZip => "7Z",
            ArchiveFormat::Rar => "RAR",
        }
    }
}

// ===== ZIP =====

/// Writes `sources` into a new deflated ZIP at `output`.
///
/// Files are stored under their own name; directories are walked and their
/// files stored relative to the directory's parent, so `docs/a.txt` keeps
/// its `docs/` prefix.
///
/// # Errors
///
/// - [`CoreError::AlreadyExists`] if `output` exists.
/// - [`CoreError::Archive`] / [`CoreError::Io`] on write failures.
pub fn write_zip(sources: &[PathBuf], output: &Path) -> CoreResult<()> {
    if output.symlink_metadata().is_ok() {
        return Err(CoreError::AlreadyExists(output.to_path_buf()));
    }

    // Walk every source before touching `output`.
    let mut members = Vec::new();
    for source in sources {
        let base = source.parent().unwrap_or(Path::new(""));
        for file in collect_files(source)? {
            members.push((archive_name(&file, base), file));
        }
    }

    let result = File::create(output)
        .map_err(CoreError::from)
        .and_then(|file| write_members(file, &members));
    if result.is_err() {
        if let Err(e) = std::fs::remove_file(output) {
            warn!(output = %output.display(), error = %e, "could not remove partial archive");
        }
    }
    result
}

fn write_members(file: File, members: &[(String, PathBuf)]) -> CoreResult<()> {
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, path) in members {
        writer.start_file(name.as_str(), options)?;
        io::copy(&mut File::open(path)?, &mut writer)?;
    }

    writer.finish()?;
    Ok(())
}

fn collect_files(root: &Path) -> CoreResult<Vec<PathBuf>> {
    let meta = std::fs::metadata(root).map_err(|e| CoreError::from_io(e, root))?;
    if !meta.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for child in std::fs::read_dir(&dir)? {
            let path = child?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.is_file() {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Forward-slash archive name of `file` relative to `base`.
fn archive_name(file: &Path, base: &Path) -> String {
    let relative = file.strip_prefix(base).unwrap_or(file);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Extracts every entry of the ZIP at `archive` under `dest_dir`.
///
/// Entries whose names would escape `dest_dir` are skipped.
pub fn read_zip(archive: &Path, dest_dir: &Path) -> CoreResult<usize> {
    let file = File::open(archive).map_err(|e| CoreError::from_io(e, archive))?;
    let mut zip = zip::ZipArchive::new(file)?;
    let mut written = 0;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            warn!(name = entry.name(), "skipping unsafe zip entry");
            continue;
        };
        let target = dest_dir.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        io::copy(&mut entry, &mut File::create(&target)?)?;
        written += 1;
    }

    Ok(written)
}

// ===== External tools =====

fn run_tool(tool: &str, args: &[&OsStr]) -> CoreResult<()> {
    debug!(tool, ?args, "running archiver");
    let output = Command::new(tool).args(args).output()?;
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Err(CoreError::ExternalTool {
        tool: tool.to_string(),
        reason: if stderr.is_empty() {
            output.status.to_string()
        } else {
            stderr
        },
    })
}

fn tool_missing(err: &CoreError) -> bool {
    matches!(err, CoreError::Io(e) if e.kind() == io::ErrorKind::NotFound)
}

fn missing_message(tool: &str) -> String {
    match tool {
        "7z" => "7-Zip not found. Please install 7-Zip first.".to_string(),
        _ => "RAR not found. Please install RAR first.".to_string(),
    }
}

// ===== Browser-facing operations =====

/// Compresses `sources` into `output` using `format`.
pub fn compress(sources: &[PathBuf], output: &Path, format: ArchiveFormat) -> OpOutcome {
    let output_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let result = match format {
        ArchiveFormat::Zip => write_zip(sources, output),
        ArchiveFormat::SevenZip => {
            let mut args = vec![OsStr::new("a"), OsStr::new("-t7z"), output.as_os_str()];
            args.extend(sources.iter().map(|s| s.as_os_str()));
            run_tool("7z", &args)
        }
        ArchiveFormat::Rar => {
            let mut args = vec![OsStr::new("a"), OsStr::new("-ep1"), output.as_os_str()];
            args.extend(sources.iter().map(|s| s.as_os_str()));
            run_tool("rar", &args)
        }
    };

    match result {
        Ok(()) => OpOutcome::ok(format!("Successfully compressed to {output_name}")),
        Err(e) if tool_missing(&e) && format != ArchiveFormat::Zip => {
            let tool = if format == ArchiveFormat::Rar { "rar" } else { "7z" };
            OpOutcome::failed(missing_message(tool))
        }
        Err(e) => {
            warn!(output = %output.display(), error = %e, "compression failed");
            OpOutcome::failed(format!("{} compression failed: {e}", format.short()))
        }
    }
}

/// Extracts `archive` into `dest_dir`, choosing the tool by extension.
///
/// `.zip` is built in, `.rar` uses `unrar`, everything else is handed to `7z`.
pub fn extract(archive: &Path, dest_dir: &Path) -> OpOutcome {
    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = archive
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let (label, tool, result) = match ext.as_str() {
        "zip" => ("ZIP", "", read_zip(archive, dest_dir).map(|_| ())),
        "rar" => {
            let args = [
                OsStr::new("x"),
                OsStr::new("-y"),
                archive.as_os_str(),
                dest_dir.as_os_str(),
            ];
            ("RAR", "unrar", run_tool("unrar", &args))
        }
        _ => {
            let out_flag = format!("-o{}", dest_dir.display());
            let args = [
                OsStr::new("x"),
                archive.as_os_str(),
                OsStr::new(&out_flag),
                OsStr::new("-y"),
            ];
            ("7Z", "7z", run_tool("7z", &args))
        }
    };

    match result {
        Ok(()) => OpOutcome::ok(format!("Successfully extracted {name}")),
        Err(e) if !tool.is_empty() && tool_missing(&e) => OpOutcome::failed(missing_message(tool)),
        Err(e) => {
            warn!(archive = %archive.display(), error = %e, "extraction failed");
            OpOutcome::failed(format!("{label} extraction failed: {e}"))
        }
    }
}
