use gridfm_core::config::theme::{parse_color, Theme};
use gridfm_core::session::Dialog;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Renders a dialog as a centered popup.
///
/// Live search and filter prompts are shown in the banner line instead, so
/// the narrowed grid stays visible while typing.
pub fn render_dialog(f: &mut Frame, dialog: &Dialog, theme: &Theme) {
    if dialog.is_live() {
        return;
    }
    let lines = dialog_lines(dialog, theme);
    let area = centered_rect(50, 40, f.area());
    let border_fg = parse_color(&theme.dialog.border_fg);

    f.render_widget(Clear, area);

    let popup = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", dialog.title()))
            .border_style(Style::default().fg(border_fg)),
    );

    f.render_widget(popup, area);
}

fn dialog_lines(dialog: &Dialog, theme: &Theme) -> Vec<Line<'static>> {
    let input_style = Style::default().fg(parse_color(&theme.dialog.input_fg));
    let highlight_style = Style::default()
        .fg(parse_color(&theme.dialog.highlight_fg))
        .add_modifier(Modifier::BOLD | Modifier::REVERSED);

    let mut lines = vec![Line::from(dialog.prompt()), Line::from("")];

    if let Some(value) = dialog.input() {
        lines.push(Line::from(Span::styled(format!("> {value}_"), input_style)));
        lines.push(Line::from(""));
        lines.push(Line::from("[Enter] OK  [Esc] Cancel"));
    } else if let Some((options, selected)) = dialog.menu_options() {
        lines.extend(options.into_iter().enumerate().map(|(i, option)| {
            if i == selected {
                Line::from(Span::styled(format!("> {option}"), highlight_style))
            } else {
                Line::from(format!("  {option}"))
            }
        }));
    } else {
        lines.push(Line::from("[y] Yes  [n] No"));
    }
    lines
}

/// Calculates a centered rectangle of the given percentage size within the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
