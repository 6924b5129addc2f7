//! Ordering of directory listings.

use std::cmp::Ordering;
use std::time::SystemTime;

use crate::fs::entry::{Entry, UNAVAILABLE};

/// The key by which entries are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Case-insensitive name.
    #[default]
    Name,
    /// File size parsed back from its display string.
    Size,
    /// Modification time, re-read from disk at sort time.
    Date,
    /// Lowercased extension, then name.
    Type,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [SortMode::Name, SortMode::Size, SortMode::Date, SortMode::Type];

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Name => "Name",
            SortMode::Size => "Size",
            SortMode::Date => "Date",
            SortMode::Type => "Type",
        }
    }

    /// Parses a config value such as `"size"`; unknown values fall back to `Name`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "size" => SortMode::Size,
            "date" | "modified" => SortMode::Date,
            "type" | "extension" => SortMode::Type,
            _ => SortMode::Name,
        }
    }
}

/// Sort mode plus direction. Survives directory changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub mode: SortMode,
    pub reverse: bool,
}

impl SortSpec {
    pub fn new(mode: SortMode, reverse: bool) -> Self {
        Self { mode, reverse }
    }

    pub fn with_mode(self, mode: SortMode) -> Self {
        Self { mode, ..self }
    }

    pub fn toggled(self) -> Self {
        Self {
            reverse: !self.reverse,
            ..self
        }
    }

    pub fn direction_label(self) -> &'static str {
        if self.reverse {
            "Descending"
        } else {
            "Ascending"
        }
    }

    /// Header text, e.g. `"Sort: Size (desc)"`.
    pub fn summary(self) -> String {
        let dir = if self.reverse { "desc" } else { "asc" };
        format!("Sort: {} ({dir})", self.mode.label())
    }
}

/// Parses a size display such as `"1.5 KB"` back into bytes.
///
/// Anything that is not `"<number> <unit>"` yields `0.0`; unknown units
/// multiply by one.
pub fn parse_size_display(s: &str) -> f64 {
    if s.is_empty() || s == UNAVAILABLE {
        return 0.0;
    }
    let mut parts = s.split_whitespace();
    let (Some(value), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
        return 0.0;
    };
    let Ok(value) = value.parse::<f64>() else {
        return 0.0;
    };
    let multiplier = match unit {
        "B" => 1.0,
        "KB" => 1024.0,
        "MB" => 1024f64.powi(2),
        "GB" => 1024f64.powi(3),
        "TB" => 1024f64.powi(4),
        "PB" => 1024f64.powi(5),
        _ => 1.0,
    };
    value * multiplier
}

/// Sorts `entries` and returns a new vector; the input is never mutated.
///
/// ".." is lifted out before sorting and put back at index 0. In Name,
/// Size and Type modes directories precede files in both directions and
/// `reverse` flips the order within each group. Date mode reverses its
/// whole key instead, with directories pinned through a sentinel time.
/// Sorting is stable and never fails.
pub fn sort_entries(entries: &[Entry], spec: SortSpec) -> Vec<Entry> {
    let (parent, rest): (Vec<&Entry>, Vec<&Entry>) = entries.iter().partition(|e| e.is_parent());

    let sorted = match spec.mode {
        SortMode::Date => sort_by_date(rest, spec.reverse),
        mode => {
            let mut rest = rest;
            rest.sort_by(|a, b| {
                b.is_dir().cmp(&a.is_dir()).then_with(|| {
                    let ord = compare_within_group(a, b, mode);
                    if spec.reverse {
                        ord.reverse()
                    } else {
                        ord
                    }
                })
            });
            rest
        }
    };

    parent.into_iter().chain(sorted).cloned().collect()
}

fn compare_within_group(a: &Entry, b: &Entry, mode: SortMode) -> Ordering {
    let by_name = || a.name().to_lowercase().cmp(&b.name().to_lowercase());
    match mode {
        SortMode::Size if !a.is_dir() => parse_size_display(a.size_display())
            .total_cmp(&parse_size_display(b.size_display()))
            .then_with(by_name),
        SortMode::Type if !a.is_dir() => a
            .extension_lower()
            .cmp(&b.extension_lower())
            .then_with(by_name),
        _ => by_name(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DateKey {
    Earliest,
    At(SystemTime),
    Latest,
}

fn sort_by_date(entries: Vec<&Entry>, reverse: bool) -> Vec<&Entry> {
    let sentinel = if reverse {
        DateKey::Latest
    } else {
        DateKey::Earliest
    };

    let mut keyed: Vec<(DateKey, String, &Entry)> = entries
        .into_iter()
        .map(|e| {
            let key = if e.is_dir() {
                sentinel
            } else {
                std::fs::metadata(e.path())
                    .and_then(|m| m.modified())
                    .map(DateKey::At)
                    .unwrap_or(sentinel)
            };
            (key, e.name().to_lowercase(), e)
        })
        .collect();

    keyed.sort_by(|a, b| {
        let ord = (&a.0, &a.1).cmp(&(&b.0, &b.1));
        if reverse {
            ord.reverse()
        } else {
            ord
        }
    });

    keyed.into_iter().map(|(_, _, e)| e).collect()
}
