//! Extension filter and substring search.
//!
//! Both keep ".." unconditionally, preserve input order, and return new
//! vectors. They are never composed: the browser applies one or the other.

use crate::fs::entry::Entry;

/// Strips leading dots and surrounding whitespace and lowercases, so that
/// `".TXT"`, `"txt"` and `" .txt "` all mean the same filter.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Keeps ".." and every directory, plus files whose lowercased name ends
/// with `.{ext}`. An empty (after normalisation) `ext` returns the input.
pub fn filter_by_extension(entries: &[Entry], ext: &str) -> Vec<Entry> {
    let ext = normalize_extension(ext);
    if ext.is_empty() {
        return entries.to_vec();
    }
    let suffix = format!(".{ext}");

    entries
        .iter()
        .filter(|e| e.is_parent() || e.is_dir() || e.name().to_lowercase().ends_with(&suffix))
        .cloned()
        .collect()
}

/// Keeps ".." plus every entry whose lowercased name contains the
/// lowercased `query`. An empty query returns the input.
pub fn search_entries(entries: &[Entry], query: &str) -> Vec<Entry> {
    if query.is_empty() {
        return entries.to_vec();
    }
    let needle = query.to_lowercase();

    entries
        .iter()
        .filter(|e| e.is_parent() || e.name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::parent(PathBuf::from("/")),
            Entry::directory(PathBuf::from("/w/src")),
            Entry::file(PathBuf::from("/w/main.RS"), "1.0 KB".into(), String::new()),
            Entry::file(PathBuf::from("/w/notes.txt"), "2.0 B".into(), String::new()),
            Entry::file(PathBuf::from("/w/rsync.log"), "3.0 B".into(), String::new()),
        ]
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name()).collect()
    }

    // ===== filter_by_extension tests =====

    #[test]
    fn extension_filter_keeps_dirs_and_matches() {
        let filtered = filter_by_extension(&sample(), "rs");
        assert_eq!(names(&filtered), vec!["..", "src", "main.RS"]);
    }

    #[test]
    fn extension_filter_strips_leading_dots() {
        assert_eq!(
            filter_by_extension(&sample(), "..txt"),
            filter_by_extension(&sample(), "TXT")
        );
    }

    #[test]
    fn extension_filter_empty_is_identity() {
        assert_eq!(filter_by_extension(&sample(), ""), sample());
        assert_eq!(filter_by_extension(&sample(), "."), sample());
    }

    #[test]
    fn extension_filter_is_idempotent() {
        let once = filter_by_extension(&sample(), "log");
        let twice = filter_by_extension(&once, "log");
        assert_eq!(once, twice);
    }

    #[test]
    fn extension_filter_no_match_leaves_parent_and_dirs() {
        let filtered = filter_by_extension(&sample(), "pdf");
        assert_eq!(names(&filtered), vec!["..", "src"]);
    }

    // ===== search_entries tests =====

    #[test]
    fn search_is_case_insensitive_substring() {
        let found = search_entries(&sample(), "RS");
        assert_eq!(names(&found), vec!["..", "main.RS", "rsync.log"]);
    }

    #[test]
    fn search_filters_directories_too() {
        let found = search_entries(&sample(), "notes");
        assert_eq!(names(&found), vec!["..", "notes.txt"]);
    }

    #[test]
    fn search_empty_is_identity() {
        assert_eq!(search_entries(&sample(), ""), sample());
    }

    #[test]
    fn search_reapplied_reproduces_output() {
        let once = search_entries(&sample(), "s");
        assert_eq!(search_entries(&once, "s"), once);
    }

    #[test]
    fn parent_survives_search_with_no_hits() {
        let found = search_entries(&sample(), "zzz");
        assert_eq!(names(&found), vec![".."]);
    }
}
