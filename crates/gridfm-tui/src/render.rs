use gridfm_core::config::theme::{parse_color, Theme};
use gridfm_core::ViewFrame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::ui::footer::render_footer;
use crate::ui::grid::render_grid;
use crate::ui::header::{render_banner, render_header, HeaderProps};
use crate::ui::popup::render_dialog;

/// Lines used by the bordered header block.
const HEADER_HEIGHT: u16 = 4;
/// Lines used by the key help footer.
const FOOTER_HEIGHT: u16 = 2;

/// Main render function: composes the full screen from one frame snapshot.
///
/// Top to bottom: header, message, search/filter banner, clipboard banner,
/// rule, grid, rule, page banner, footer. The fixed parts add up to the
/// chrome the core reserves when sizing the grid.
pub fn render(f: &mut Frame, frame: &ViewFrame, theme: &Theme) {
    let chrome = frame.chrome;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(u16::from(chrome.message)),
            Constraint::Length(u16::from(chrome.banner)),
            Constraint::Length(u16::from(chrome.clipboard)),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(u16::from(chrome.page)),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(f.area());

    let path = frame.path.display().to_string();
    let props = HeaderProps {
        path: &path,
        sort_summary: &frame.sort_summary,
        view_summary: &frame.view_summary,
        total_items: frame.total_items,
        marked_count: frame.marked_count,
    };
    render_header(f, chunks[0], &props, theme);

    if let Some(message) = &frame.status_message {
        render_banner(f, chunks[1], message, &theme.banner.message_fg);
    }
    if let Some(banner) = &frame.banner {
        render_banner(f, chunks[2], banner, &theme.banner.filter_fg);
    }
    if let Some(clipboard) = &frame.clipboard_summary {
        let text = format!("Clipboard: {clipboard}");
        render_banner(f, chunks[3], &text, &theme.banner.clipboard_fg);
    }

    render_rule(f, chunks[4], theme);
    render_grid(f, chunks[5], frame, theme);
    render_rule(f, chunks[6], theme);

    if chrome.page {
        render_banner(f, chunks[7], &frame.layout_summary, &theme.banner.page_fg);
    }

    render_footer(f, chunks[8], frame.dialog.is_some(), theme);

    if let Some(dialog) = &frame.dialog {
        render_dialog(f, dialog, theme);
    }
}

fn render_rule(f: &mut Frame, area: Rect, theme: &Theme) {
    let rule = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(parse_color(&theme.grid.separator_fg)));
    f.render_widget(rule, area);
}
