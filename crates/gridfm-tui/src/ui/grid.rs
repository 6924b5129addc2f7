//! Multi-column item grid.
//!
//! The page's items arrive already placed in (row, column) order from the
//! [`ViewFrame`]; this module only splits the area into equal columns and
//! formats each cell for the active view mode.

use gridfm_core::config::theme::{parse_color, Theme};
use gridfm_core::session::{FrameItem, ViewFrame};
use gridfm_core::{Entry, ViewMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::icons::{icon_for_entry, plain_marker};

/// Cursor and mark indicator columns in front of every cell.
const MARKER_WIDTH: usize = 2;

/// Renders the current page of the grid into `area`.
pub fn render_grid(f: &mut Frame, area: Rect, frame: &ViewFrame, theme: &Theme) {
    let columns = frame.layout.effective_columns.max(1);
    let constraints = vec![Constraint::Ratio(1, columns as u32); columns];
    let column_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    let separator = Style::default().fg(parse_color(&theme.grid.separator_fg));

    for (column, column_area) in column_areas.iter().enumerate() {
        let is_last = column + 1 == columns;
        let block = if is_last {
            Block::default()
        } else {
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(separator)
        };
        let inner = block.inner(*column_area);
        let width = usize::from(inner.width).saturating_sub(MARKER_WIDTH + 1);

        let lines: Vec<Line> = frame
            .column(column)
            .map(|item| cell_line(item, width, frame.view_mode, frame.show_icons, theme))
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), *column_area);
    }
}

fn cell_line(
    item: &FrameItem,
    width: usize,
    mode: ViewMode,
    show_icons: bool,
    theme: &Theme,
) -> Line<'static> {
    let marker = format!(
        "{}{}",
        if item.is_cursor { '>' } else { ' ' },
        if item.is_marked { '*' } else { ' ' }
    );
    let marker_style = Style::default().fg(parse_color(&theme.grid.marked_fg));
    Line::from(vec![
        Span::styled(marker, marker_style),
        Span::styled(format_cell(&item.entry, width, mode, show_icons), cell_style(item, theme)),
    ])
}

fn cell_style(item: &FrameItem, theme: &Theme) -> Style {
    let grid = &theme.grid;
    let base = if item.entry.is_placeholder() {
        Style::default().fg(parse_color(&grid.placeholder_fg))
    } else if item.is_marked {
        Style::default()
            .fg(parse_color(&grid.marked_fg))
            .add_modifier(Modifier::BOLD)
    } else if item.entry.is_dir() {
        Style::default()
            .fg(parse_color(&grid.dir_fg))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(parse_color(&grid.file_fg))
    };

    if item.is_cursor {
        base.fg(parse_color(&grid.cursor_fg))
            .add_modifier(Modifier::REVERSED)
    } else {
        base
    }
}

/// Formats one cell's text to fit `width` characters.
///
/// - `Detailed`: icon and name, with the size (or `<DIR>`) right-aligned.
/// - `Compact`: icon, name and the size in parentheses when known.
/// - `List`: the name alone.
pub fn format_cell(entry: &Entry, width: usize, mode: ViewMode, show_icons: bool) -> String {
    let prefix = if show_icons {
        icon_for_entry(entry)
    } else {
        plain_marker(entry)
    };

    match mode {
        ViewMode::List => truncate(entry.name(), width),
        ViewMode::Compact => {
            let size = entry.size_display();
            let text = if size.is_empty() {
                format!("{prefix}{}", entry.name())
            } else {
                format!("{prefix}{} ({size})", entry.name())
            };
            truncate(&text, width)
        }
        ViewMode::Detailed => {
            let right = if entry.is_parent() || entry.is_placeholder() {
                ""
            } else if entry.is_dir() {
                "<DIR>"
            } else {
                entry.size_display()
            };
            align_columns(&format!("{prefix}{}", entry.name()), right, width)
        }
    }
}

/// Left text padded so `right` ends exactly at `width`. Falls back to the
/// left text alone when both do not fit.
fn align_columns(left: &str, right: &str, width: usize) -> String {
    let right_len = right.chars().count();
    if right.is_empty() || width < right_len + 2 {
        return truncate(left, width);
    }
    let left_room = width - right_len - 1;
    let left = truncate(left, left_room);
    let pad = left_room - left.chars().count() + 1;
    format!("{left}{}{right}", " ".repeat(pad))
}

/// Cuts `text` to `width` characters, ending in an ellipsis when shortened.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}
