//! Two-line key help footer.

use gridfm_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

const BROWSE_HELP: [&str; 2] = [
    " ↑↓←→ Move  PgUp/PgDn Page  Enter Open  Bksp Back  Space Mark  a All  / Search  f Filter  Esc Clear",
    " s Sort  w View  l Layout  c Copy  x Cut  v Paste  r Rename  d Delete  n Folder  t File  z Compress  e Extract  q Quit",
];

const DIALOG_HELP: [&str; 2] = [
    " Type to edit  Enter Confirm  Esc Cancel",
    " ↑↓ Choose  1-9 Pick  y/n Answer",
];

/// Renders the key help for browsing, or for the open dialog.
pub fn render_footer(f: &mut Frame, area: Rect, dialog_open: bool, theme: &Theme) {
    let style = Style::default()
        .fg(parse_color(&theme.footer.fg))
        .bg(parse_color(&theme.footer.bg));
    let lines: Vec<Line> = help_lines(dialog_open)
        .iter()
        .map(|text| Line::from(*text))
        .collect();
    f.render_widget(Paragraph::new(lines).style(style), area);
}

fn help_lines(dialog_open: bool) -> &'static [&'static str; 2] {
    if dialog_open {
        &DIALOG_HELP
    } else {
        &BROWSE_HELP
    }
}
