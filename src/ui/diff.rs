//! Pure render functions for the word-level comparison view.

use crate::domain::{DiffSegment, DiffSummary, SegmentKind};
use crate::ui::theme;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render the comparison of one snapshot against the current draft.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    draft_name: &str,
    version: u64,
    segments: &[DiffSegment],
    summary: &DiffSummary,
    scroll: usize,
) {
    let ui = theme::current_ui();
    let title = format!(" {}: v{} → current ", draft_name, version);
    let subtitle = format!(
        "{} added, {} removed, {} unchanged",
        summary.words_added, summary.words_removed, summary.words_unchanged
    );

    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Header
    let header_block = Block::default()
        .title(title)
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(ui.fg_border));
    let header_inner = header_block.inner(chunks[0]);
    frame.render_widget(header_block, chunks[0]);
    frame.render_widget(
        Paragraph::new(subtitle).style(Style::default().fg(ui.fg_muted)),
        header_inner,
    );

    // Wrapped prose with word-level highlights
    let body_width = chunks[1].width.saturating_sub(4) as usize;
    let lines = wrap_segments(segments, body_width.max(8));
    let visible: Vec<ListItem> = lines
        .iter()
        .skip(scroll)
        .map(|line| ListItem::new(line.clone()))
        .collect();

    let body_block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(ui.fg_border))
        .padding(Padding::horizontal(1));
    frame.render_widget(List::new(visible).block(body_block), chunks[1]);

    // Help bar
    render_diff_help(frame, chunks[2]);
}

/// Total wrapped line count, for scroll clamping.
pub fn line_count(segments: &[DiffSegment], width: usize) -> usize {
    wrap_segments(segments, width.max(8)).len()
}

/// Flow diff segments into wrapped lines of styled word spans.
/// Paragraph breaks in the draft are preserved; wrapping happens at word
/// boundaries using display width.
fn wrap_segments(segments: &[DiffSegment], max_width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0usize;

    let mut flush = |current: &mut Vec<Span<'static>>, current_width: &mut usize,
                     lines: &mut Vec<Line<'static>>| {
        lines.push(Line::from(std::mem::take(current)));
        *current_width = 0;
    };

    for segment in segments {
        let style = segment_style(segment.kind);
        let mut first_line = true;

        for text_line in segment.text.split('\n') {
            if !first_line {
                // Explicit newline in the draft.
                flush(&mut current, &mut current_width, &mut lines);
            }
            first_line = false;

            for word in text_line.split_whitespace() {
                let word_width = word.width();
                let needed = if current.is_empty() {
                    word_width
                } else {
                    word_width + 1
                };

                if current_width + needed > max_width && !current.is_empty() {
                    flush(&mut current, &mut current_width, &mut lines);
                }
                if !current.is_empty() {
                    current.push(Span::raw(" "));
                    current_width += 1;
                }
                current.push(Span::styled(word.to_string(), style));
                current_width += word_width;
            }
        }
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

fn segment_style(kind: SegmentKind) -> Style {
    let ui = theme::current_ui();
    match kind {
        SegmentKind::Added => Style::default().fg(ui.fg_added).bg(ui.bg_added_word),
        SegmentKind::Removed => Style::default()
            .fg(ui.fg_removed)
            .bg(ui.bg_removed_word)
            .add_modifier(Modifier::CROSSED_OUT),
        SegmentKind::Unchanged => Style::default().fg(ui.fg_default),
    }
}

fn render_diff_help(frame: &mut Frame, area: Rect) {
    let ui = theme::current_ui();
    let key_style = Style::default().fg(ui.fg_warning);
    let help = Line::from(vec![
        Span::styled("[j/k]", key_style),
        Span::raw(" Scroll  "),
        Span::styled("[n/p]", key_style),
        Span::raw(" Older/newer version  "),
        Span::styled("[Esc]", key_style),
        Span::raw(" Back"),
    ]);

    frame.render_widget(Paragraph::new(help), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diff::compute_diff;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let segments = vec![DiffSegment::new(
            SegmentKind::Unchanged,
            "one two three four five",
        )];
        let lines = wrap_segments(&segments, 10);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line_text(line).width() <= 10);
        }
    }

    #[test]
    fn preserves_paragraph_breaks() {
        let segments = vec![DiffSegment::new(SegmentKind::Unchanged, "alpha\n\nbeta")];
        let lines = wrap_segments(&segments, 40);
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), "alpha");
        assert_eq!(line_text(&lines[1]), "");
        assert_eq!(line_text(&lines[2]), "beta");
    }

    #[test]
    fn mixed_segments_stay_on_one_line_when_they_fit() {
        let segments = compute_diff("Hello world", "Hello brave world");
        let lines = wrap_segments(&segments, 40);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "Hello brave world");
    }

    #[test]
    fn long_words_still_get_emitted() {
        let segments = vec![DiffSegment::new(
            SegmentKind::Added,
            "supercalifragilistic",
        )];
        let lines = wrap_segments(&segments, 8);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "supercalifragilistic");
    }

    #[test]
    fn line_count_matches_wrapping() {
        let segments = vec![DiffSegment::new(
            SegmentKind::Unchanged,
            "one two three four",
        )];
        assert_eq!(line_count(&segments, 9), wrap_segments(&segments, 9).len());
    }
}
