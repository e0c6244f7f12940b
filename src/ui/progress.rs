//! Pure render functions for the goal and streak progress view.

use crate::domain::progress::{daily_progress_percent, goal_progress_percent};
use crate::domain::{StreakBadge, StreakTier, WritingGoals};
use crate::ui::theme;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
    Frame,
};

/// Render goal progress, daily progress, and the streak badge.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    draft_name: &str,
    current_words: usize,
    goals: &WritingGoals,
    streak: StreakBadge,
) {
    let ui = theme::current_ui();
    let block = Block::default()
        .title(format!(" {}: progress ", draft_name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ui.fg_border))
        .padding(Padding::uniform(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            Constraint::Length(2), // word count
            Constraint::Length(3), // goal gauge
            Constraint::Length(3), // daily gauge
            Constraint::Length(2), // streak badge
            Constraint::Min(0),    // target date pace
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Current draft: ", Style::default().fg(ui.fg_muted)),
            Span::styled(
                format!("{} words", current_words),
                Style::default()
                    .fg(ui.fg_default)
                    .add_modifier(Modifier::BOLD),
            ),
        ])),
        chunks[0],
    );

    render_goal_gauge(frame, chunks[1], current_words, goals, &ui);
    render_daily_gauge(frame, chunks[2], current_words, goals, &ui);
    render_streak(frame, chunks[3], streak, &ui);
    render_pace(frame, chunks[4], current_words, goals, &ui);
}

fn render_goal_gauge(
    frame: &mut Frame,
    area: Rect,
    current_words: usize,
    goals: &WritingGoals,
    ui: &theme::UiTheme,
) {
    match goals.target_word_count {
        Some(target) => {
            let pct = goal_progress_percent(current_words, Some(target));
            let gauge = Gauge::default()
                .block(Block::default().title("Word count goal"))
                .gauge_style(Style::default().fg(ui.gauge_goal))
                .ratio(pct / 100.0)
                .label(format!("{} / {} words ({:.0}%)", current_words, target, pct));
            frame.render_widget(gauge, area);
        }
        None => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No word-count goal configured (set goals.target_word_count)",
                    Style::default().fg(ui.fg_muted),
                )),
                area,
            );
        }
    }
}

fn render_daily_gauge(
    frame: &mut Frame,
    area: Rect,
    today_words: usize,
    goals: &WritingGoals,
    ui: &theme::UiTheme,
) {
    match goals.daily_word_count {
        Some(goal) => {
            let pct = daily_progress_percent(today_words, Some(goal));
            let gauge = Gauge::default()
                .block(Block::default().title("Today's goal"))
                .gauge_style(Style::default().fg(ui.gauge_daily))
                .ratio(pct / 100.0)
                .label(format!("{} / {} words ({:.0}%)", today_words, goal, pct));
            frame.render_widget(gauge, area);
        }
        None => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No daily goal configured (set goals.daily_word_count)",
                    Style::default().fg(ui.fg_muted),
                )),
                area,
            );
        }
    }
}

fn render_streak(frame: &mut Frame, area: Rect, streak: StreakBadge, ui: &theme::UiTheme) {
    let color = streak_color(streak.tier, ui);
    let days = match streak.days {
        0 => "Streak: —".to_string(),
        1 => "Streak: 1 day".to_string(),
        n => format!("Streak: {} days", n),
    };

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("● ", Style::default().fg(color)),
            Span::styled(days, Style::default().fg(ui.fg_default)),
            Span::raw("  "),
            Span::styled(
                streak.label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ])),
        area,
    );
}

/// Remaining-words pace hint when both a target date and a word goal exist.
fn render_pace(
    frame: &mut Frame,
    area: Rect,
    current_words: usize,
    goals: &WritingGoals,
    ui: &theme::UiTheme,
) {
    let (Some(target_date), Some(target_words)) = (goals.target_date, goals.target_word_count)
    else {
        return;
    };

    let today = chrono::Local::now().date_naive();
    let days_left = target_date.signed_duration_since(today).num_days();
    let remaining = (target_words as i64 - current_words as i64).max(0);

    let line = if days_left < 0 {
        Line::from(Span::styled(
            format!("Target date {} has passed", target_date),
            Style::default().fg(ui.fg_warning),
        ))
    } else if remaining == 0 {
        Line::from(Span::styled(
            "Goal reached — ahead of schedule",
            Style::default().fg(ui.fg_added),
        ))
    } else {
        let pace = pace_per_day(remaining, days_left);
        Line::from(Span::styled(
            format!(
                "{} words to go, {} day{} left (≈{} words/day)",
                remaining,
                days_left,
                if days_left == 1 { "" } else { "s" },
                pace
            ),
            Style::default().fg(ui.fg_muted),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn pace_per_day(remaining: i64, days_left: i64) -> i64 {
    // Due today counts as one writing day.
    let days = days_left.max(1);
    (remaining + days - 1) / days
}

fn streak_color(tier: StreakTier, ui: &theme::UiTheme) -> Color {
    match tier {
        StreakTier::None => ui.fg_muted,
        StreakTier::Started => ui.fg_default,
        StreakTier::Building => ui.fg_warning,
        StreakTier::Strong => ui.fg_accent,
        StreakTier::Elite => ui.fg_added,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pace_rounds_up() {
        assert_eq!(pace_per_day(1000, 3), 334);
        assert_eq!(pace_per_day(900, 3), 300);
    }

    #[test]
    fn pace_due_today_is_everything_remaining() {
        assert_eq!(pace_per_day(500, 0), 500);
    }
}
