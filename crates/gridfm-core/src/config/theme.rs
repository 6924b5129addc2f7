//! Colour theme.
//!
//! Colors are stored as strings (e.g. `"blue"`, `"#ff5500"`) and converted
//! to [`ratatui::style::Color`] at render time via [`parse_color`].

use serde::{Deserialize, Serialize};

/// Per-component colour groups, read from the `[theme]` table of the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub header: HeaderTheme,
    #[serde(default)]
    pub grid: GridTheme,
    #[serde(default)]
    pub banner: BannerTheme,
    #[serde(default)]
    pub dialog: DialogTheme,
    #[serde(default)]
    pub footer: FooterTheme,
}

/// Path and info lines at the top.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderTheme {
    pub border_fg: String,
    pub path_fg: String,
    pub info_fg: String,
}

impl Default for HeaderTheme {
    fn default() -> Self {
        Self {
            border_fg: "dark_gray".to_string(),
            path_fg: "white".to_string(),
            info_fg: "gray".to_string(),
        }
    }
}

/// The item grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTheme {
    pub dir_fg: String,
    pub file_fg: String,
    pub cursor_fg: String,
    pub marked_fg: String,
    pub separator_fg: String,
    pub placeholder_fg: String,
}

impl Default for GridTheme {
    fn default() -> Self {
        Self {
            dir_fg: "blue".to_string(),
            file_fg: "reset".to_string(),
            cursor_fg: "yellow".to_string(),
            marked_fg: "green".to_string(),
            separator_fg: "dark_gray".to_string(),
            placeholder_fg: "red".to_string(),
        }
    }
}

/// Optional one-line banners.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerTheme {
    pub message_fg: String,
    pub filter_fg: String,
    pub clipboard_fg: String,
    pub page_fg: String,
}

impl Default for BannerTheme {
    fn default() -> Self {
        Self {
            message_fg: "magenta".to_string(),
            filter_fg: "cyan".to_string(),
            clipboard_fg: "light_blue".to_string(),
            page_fg: "dark_gray".to_string(),
        }
    }
}

/// Popup dialogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogTheme {
    pub border_fg: String,
    pub input_fg: String,
    pub highlight_fg: String,
}

impl Default for DialogTheme {
    fn default() -> Self {
        Self {
            border_fg: "yellow".to_string(),
            input_fg: "white".to_string(),
            highlight_fg: "yellow".to_string(),
        }
    }
}

/// Key help line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterTheme {
    pub fg: String,
    pub bg: String,
}

impl Default for FooterTheme {
    fn default() -> Self {
        Self {
            fg: "black".to_string(),
            bg: "gray".to_string(),
        }
    }
}

/// Parses a colour name or `#rrggbb` hex string; unknown input is `Reset`.
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    let lower = s.trim().to_lowercase();
    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex).unwrap_or(Color::Reset);
    }

    match lower.replace(['_', '-', ' '], "").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

fn parse_hex(hex: &str) -> Option<ratatui::style::Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(ratatui::style::Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}
