//! Nerd Font icon mapping for grid entries.
//!
//! Maps file extensions and a few well-known filenames to Nerd Font glyphs.
//! Every icon carries its own trailing space so callers can prepend it.

use gridfm_core::Entry;

/// Returns a Nerd Font icon for the given entry.
pub fn icon_for_entry(entry: &Entry) -> &'static str {
    if entry.is_parent() {
        return "\u{f062} "; // arrow up
    }
    if entry.is_placeholder() {
        return "\u{f071} "; // warning
    }
    if entry.is_dir() {
        return "\u{f07b} "; // folder
    }

    if let Some(icon) = icon_for_filename(entry.name()) {
        return icon;
    }

    let ext = entry.extension_lower();
    icon_for_extension(ext.trim_start_matches('.'))
}

/// Plain-text stand-in used when icons are turned off.
pub fn plain_marker(entry: &Entry) -> &'static str {
    if entry.is_dir() {
        "/"
    } else {
        " "
    }
}

fn icon_for_filename(name: &str) -> Option<&'static str> {
    let icon = match name.to_lowercase().as_str() {
        "makefile" | "gnumakefile" => "\u{e779} ",
        "dockerfile" => "\u{f308} ",
        "cargo.toml" | "cargo.lock" => "\u{e7a8} ",
        ".gitignore" | ".gitmodules" | ".gitattributes" => "\u{e702} ",
        "license" | "license.md" | "license.txt" => "\u{f0219} ",
        "readme.md" | "readme" | "readme.txt" => "\u{e73e} ",
        _ => return None,
    };
    Some(icon)
}

fn icon_for_extension(ext: &str) -> &'static str {
    match ext {
        // Source code
        "rs" => "\u{e7a8} ",
        "py" | "pyw" | "pyi" => "\u{e73c} ",
        "js" | "mjs" | "cjs" => "\u{e74e} ",
        "ts" | "mts" | "cts" => "\u{e628} ",
        "go" => "\u{e724} ",
        "java" | "jar" => "\u{e738} ",
        "c" | "h" => "\u{e61e} ",
        "cpp" | "cc" | "cxx" | "hpp" => "\u{e61d} ",
        "sh" | "bash" | "zsh" | "fish" => "\u{f489} ",

        // Config and markup
        "toml" | "ini" | "cfg" | "conf" => "\u{e615} ",
        "yaml" | "yml" => "\u{e6a8} ",
        "json" | "jsonc" => "\u{e60b} ",
        "html" | "htm" => "\u{e736} ",
        "css" | "scss" => "\u{e749} ",
        "md" | "markdown" => "\u{e73e} ",

        // Documents
        "txt" | "text" | "log" => "\u{f15c} ",
        "pdf" => "\u{f1c1} ",
        "doc" | "docx" | "odt" => "\u{f1c2} ",
        "xls" | "xlsx" | "csv" | "ods" => "\u{f1c3} ",
        "ppt" | "pptx" | "odp" => "\u{f1c4} ",

        // Archives
        "zip" | "tar" | "gz" | "bz2" | "xz" | "7z" | "rar" => "\u{f410} ",

        // Media
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "ico" | "svg" => "\u{f1c5} ",
        "mp3" | "wav" | "flac" | "ogg" | "aac" | "m4a" => "\u{f001} ",
        "mp4" | "avi" | "mkv" | "mov" | "webm" => "\u{f03d} ",

        _ => "\u{f15b} ",
    }
}
