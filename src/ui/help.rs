//! Pure render function for the help overlay.

use crate::keymap::Keymap;
use crate::ui::theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

/// Render the help overlay, generated from the keymap's own bindings.
pub fn render(frame: &mut Frame, area: Rect, keymap: &Keymap) {
    let ui = theme::current_ui();
    let popup_area = centered_rect(60, 70, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let mut help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ui.fg_accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (category, entries) in keymap.help_entries() {
        help_text.push(Line::from(Span::styled(
            category.display_name(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for entry in entries {
            help_text.push(Line::from(vec![
                Span::styled(
                    format!("  {:<8} ", entry.key_display),
                    Style::default().fg(ui.fg_warning),
                ),
                Span::raw(entry.description),
            ]));
        }
        help_text.push(Line::from(""));
    }

    help_text.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(ui.fg_muted),
    )));

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .padding(Padding::uniform(1))
                .style(Style::default().bg(ui.bg_default)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
