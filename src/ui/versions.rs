//! Pure render functions for the version history view.

use crate::domain::Snapshot;
use crate::ui::theme;
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table, TableState},
    Frame,
};

/// Render the version history table, newest snapshot first.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshots: &[Snapshot],
    selected: usize,
    draft_name: &str,
    current_words: usize,
    table_state: &mut TableState,
) {
    let ui = theme::current_ui();
    let title = format!(
        " redline: {} ({} versions, {} words now) ",
        draft_name,
        snapshots.len(),
        current_words
    );

    if snapshots.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No snapshots yet.",
                Style::default().fg(ui.fg_muted),
            )),
            Line::from(Span::styled(
                "Press s to save the current draft as version 1.",
                Style::default().fg(ui.fg_muted),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ui.fg_border)),
        );
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Version").style(Style::default().fg(ui.fg_muted)),
        Cell::from("Words").style(Style::default().fg(ui.fg_muted)),
        Cell::from("Δ").style(Style::default().fg(ui.fg_muted)),
        Cell::from("Saved").style(Style::default().fg(ui.fg_muted)),
    ])
    .height(1);

    let rows: Vec<Row> = snapshots
        .iter()
        .enumerate()
        .map(|(i, snapshot)| {
            let style = if i == selected {
                Style::default()
                    .bg(ui.bg_selected)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            // Snapshots run newest-first, so the previous version is the
            // next row down.
            let delta = word_delta(snapshot, snapshots.get(i + 1));

            Row::new(vec![
                Cell::from(Span::styled(
                    format!("v{}", snapshot.version),
                    Style::default().fg(ui.fg_accent),
                )),
                Cell::from(snapshot.word_count.to_string()),
                Cell::from(delta_span(delta, &ui)),
                Cell::from(Span::styled(
                    snapshot.relative_time(),
                    Style::default().fg(ui.fg_muted),
                )),
            ])
            .style(style)
        })
        .collect();

    table_state.select(Some(selected));

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ui.fg_border))
            .padding(Padding::horizontal(1)),
    )
    .row_highlight_style(Style::default().bg(ui.bg_selected));

    frame.render_stateful_widget(table, area, table_state);
}

/// Render the help bar at the bottom.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let ui = theme::current_ui();
    let key_style = Style::default().fg(ui.fg_warning);
    let help = Line::from(vec![
        Span::styled("[Enter]", key_style),
        Span::raw(" Compare  "),
        Span::styled("[s]", key_style),
        Span::raw(" Snapshot  "),
        Span::styled("[p]", key_style),
        Span::raw(" Progress  "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit  "),
        Span::styled("[?]", key_style),
        Span::raw(" Help"),
    ]);

    frame.render_widget(Paragraph::new(help), area);
}

/// Render a transient status message in place of the help bar.
pub fn render_status(frame: &mut Frame, area: Rect, message: &str) {
    let ui = theme::current_ui();
    frame.render_widget(
        Paragraph::new(Span::styled(message, Style::default().fg(ui.fg_accent))),
        area,
    );
}

fn word_delta(snapshot: &Snapshot, previous: Option<&Snapshot>) -> i64 {
    let before = previous.map(|p| p.word_count as i64).unwrap_or(0);
    snapshot.word_count as i64 - before
}

fn delta_span(delta: i64, ui: &theme::UiTheme) -> Span<'static> {
    if delta > 0 {
        Span::styled(format!("+{}", delta), Style::default().fg(ui.fg_added))
    } else if delta < 0 {
        Span::styled(delta.to_string(), Style::default().fg(ui.fg_removed))
    } else {
        Span::styled("±0".to_string(), Style::default().fg(ui.fg_muted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(version: u64, words: usize) -> Snapshot {
        Snapshot {
            version,
            content: String::new(),
            word_count: words,
            created_at: 0,
        }
    }

    #[test]
    fn delta_against_previous_version() {
        let newer = snapshot(2, 120);
        let older = snapshot(1, 100);
        assert_eq!(word_delta(&newer, Some(&older)), 20);
        assert_eq!(word_delta(&older, None), 100);
    }

    #[test]
    fn delta_can_be_negative() {
        let newer = snapshot(2, 80);
        let older = snapshot(1, 100);
        assert_eq!(word_delta(&newer, Some(&older)), -20);
    }
}
