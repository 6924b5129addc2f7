//! Application configuration loaded from a TOML file.
//!
//! The file is optional and only ever read. See `config/gridfm.toml` at the
//! repository root for a fully commented example.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::theme::Theme;
use crate::error::{CoreError, CoreResult};
use crate::nav::grid::MAX_COLUMNS;
use crate::nav::sort::{SortMode, SortSpec};
use crate::nav::view::ViewMode;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Top-level application configuration.
///
/// All fields have defaults so gridfm works without a config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub theme: Theme,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Loads the first config found in `candidates`, or the defaults.
    ///
    /// A missing file is silent; an unreadable or malformed one is logged
    /// and skipped.
    pub fn load_or_default(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            match Self::load(path) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded config");
                    return config;
                }
                Err(CoreError::NotFound(_)) => continue,
                Err(e) => warn!(path = %path.display(), error = %e, "ignoring config"),
            }
        }
        Self::default()
    }

    /// `./config/gridfm.toml`, then `$HOME/.config/gridfm/gridfm.toml`.
    pub fn default_locations() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config").join("gridfm.toml")];
        if let Ok(home) = std::env::var("HOME") {
            paths.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("gridfm")
                    .join("gridfm.toml"),
            );
        }
        paths
    }
}

/// Browsing preferences applied when the session starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_sort")]
    pub default_sort: String,
    #[serde(default)]
    pub sort_reverse: bool,
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default = "default_view_mode")]
    pub view_mode: String,
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl GeneralConfig {
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::new(SortMode::from_str_lossy(&self.default_sort), self.sort_reverse)
    }

    pub fn view_mode(&self) -> ViewMode {
        ViewMode::from_str_lossy(&self.view_mode)
    }

    /// Requested column count clamped to `1..=4`.
    pub fn columns(&self) -> usize {
        self.columns.clamp(1, MAX_COLUMNS)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            sort_reverse: false,
            columns: default_columns(),
            view_mode: default_view_mode(),
            confirm_delete: true,
            date_format: default_date_format(),
        }
    }
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_icons: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { show_icons: true }
    }
}

fn default_true() -> bool {
    true
}

fn default_sort() -> String {
    "name".to_string()
}

fn default_columns() -> usize {
    1
}

fn default_view_mode() -> String {
    "detailed".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}
