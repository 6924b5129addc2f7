//! Header block and the optional one-line banners.
//!
//! The header is a bordered block with the current path and an info line
//! (sort, view, item and selection counts). Message, search/filter,
//! clipboard and page banners are single lines drawn around the grid.

use gridfm_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Data needed to render the header block.
pub struct HeaderProps<'a> {
    pub path: &'a str,
    pub sort_summary: &'a str,
    pub view_summary: &'a str,
    pub total_items: usize,
    pub marked_count: usize,
}

/// Renders the bordered header with the path and the info line.
pub fn render_header(f: &mut Frame, area: Rect, props: &HeaderProps<'_>, theme: &Theme) {
    let border_fg = parse_color(&theme.header.border_fg);
    let path_fg = parse_color(&theme.header.path_fg);

    let lines = vec![
        Line::from(Span::styled(
            props.path.to_owned(),
            Style::default().fg(path_fg).add_modifier(Modifier::BOLD),
        )),
        info_line(props, theme),
    ];

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" gridfm ")
            .border_style(Style::default().fg(border_fg)),
    );
    f.render_widget(header, area);
}

fn info_line(props: &HeaderProps<'_>, theme: &Theme) -> Line<'static> {
    let info_style = Style::default().fg(parse_color(&theme.header.info_fg));
    let mut spans = vec![
        Span::styled(props.sort_summary.to_owned(), info_style),
        Span::styled("  │  ", info_style),
        Span::styled(props.view_summary.to_owned(), info_style),
        Span::styled(format!("  │  {} items", props.total_items), info_style),
    ];
    if props.marked_count > 0 {
        spans.push(Span::styled(
            format!("  │  Selected: {}", props.marked_count),
            Style::default()
                .fg(parse_color(&theme.grid.marked_fg))
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// Renders one banner line in the given theme colour.
pub fn render_banner(f: &mut Frame, area: Rect, text: &str, color: &str) {
    let line = Line::from(Span::styled(
        format!(" {text}"),
        Style::default().fg(parse_color(color)),
    ));
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn props(marked_count: usize) -> HeaderProps<'static> {
        HeaderProps {
            path: "/home/user",
            sort_summary: "Sort: Name (asc)",
            view_summary: "View: Detailed",
            total_items: 7,
            marked_count,
        }
    }

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn info_line_without_marks() {
        let line = info_line(&props(0), &Theme::default());
        assert_eq!(text_of(&line), "Sort: Name (asc)  │  View: Detailed  │  7 items");
    }

    #[test]
    fn info_line_shows_marked_count_in_marked_colour() {
        let line = info_line(&props(3), &Theme::default());
        assert!(text_of(&line).ends_with("Selected: 3"));
        let last = line.spans.last().unwrap();
        assert_eq!(last.style.fg, Some(Color::Green));
    }
}
