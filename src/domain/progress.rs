//! Goal, daily, and streak progress calculations.
//! No I/O - all functions are data in, data out.

use super::types::{StreakBadge, StreakTier};

/// Percentage of the total word-count goal reached, clamped to [0, 100].
/// Returns 0 when no goal is set (or the goal is zero).
pub fn goal_progress_percent(current_words: usize, target: Option<u32>) -> f64 {
    percent_of(current_words, target)
}

/// Percentage of the daily word-count goal reached, clamped to [0, 100].
///
/// No date filtering happens here: the caller supplies whatever it treats
/// as "today's" count. The app passes the draft's total current word count,
/// matching the behavior this tool inherited rather than a true per-day
/// delta.
pub fn daily_progress_percent(today_words: usize, daily_goal: Option<u32>) -> f64 {
    percent_of(today_words, daily_goal)
}

fn percent_of(count: usize, goal: Option<u32>) -> f64 {
    match goal {
        Some(goal) if goal > 0 => (count as f64 / goal as f64 * 100.0).min(100.0),
        _ => 0.0,
    }
}

/// Map a consecutive-days count onto a tier and display label.
/// Thresholds: 0, 1, 2..=6, 7..=29, >=30.
pub fn classify_streak(days: u32) -> StreakBadge {
    let (tier, label) = match days {
        0 => (StreakTier::None, "No streak yet"),
        1 => (StreakTier::Started, "Day one"),
        2..=6 => (StreakTier::Building, "Building momentum"),
        7..=29 => (StreakTier::Strong, "On a roll"),
        _ => (StreakTier::Elite, "Unstoppable"),
    };
    StreakBadge { days, tier, label }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_progress_exact_target_is_full() {
        assert_eq!(goal_progress_percent(2000, Some(2000)), 100.0);
    }

    #[test]
    fn goal_progress_clamps_overshoot() {
        assert_eq!(goal_progress_percent(2500, Some(2000)), 100.0);
    }

    #[test]
    fn goal_progress_without_target_is_zero() {
        assert_eq!(goal_progress_percent(500, None), 0.0);
        assert_eq!(goal_progress_percent(500, Some(0)), 0.0);
    }

    #[test]
    fn goal_progress_partial() {
        assert_eq!(goal_progress_percent(500, Some(2000)), 25.0);
        assert_eq!(goal_progress_percent(0, Some(2000)), 0.0);
    }

    #[test]
    fn daily_progress_uses_same_formula() {
        assert_eq!(daily_progress_percent(250, Some(500)), 50.0);
        assert_eq!(daily_progress_percent(600, Some(500)), 100.0);
        assert_eq!(daily_progress_percent(600, None), 0.0);
    }

    #[test]
    fn streak_tier_boundaries() {
        assert_eq!(classify_streak(0).tier, StreakTier::None);
        assert_eq!(classify_streak(1).tier, StreakTier::Started);
        assert_eq!(classify_streak(2).tier, StreakTier::Building);
        assert_eq!(classify_streak(6).tier, StreakTier::Building);
        assert_eq!(classify_streak(7).tier, StreakTier::Strong);
        assert_eq!(classify_streak(29).tier, StreakTier::Strong);
        assert_eq!(classify_streak(30).tier, StreakTier::Elite);
        assert_eq!(classify_streak(365).tier, StreakTier::Elite);
    }

    #[test]
    fn streak_badge_carries_days_and_label() {
        let badge = classify_streak(12);
        assert_eq!(badge.days, 12);
        assert_eq!(badge.label, "On a roll");
    }
}
