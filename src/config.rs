//! User configuration: writing goals, theme, database location.
//!
//! Loaded from `<config_dir>/redline/config.toml` and overridable per-flag
//! on the command line. Parsing is tolerant: unknown keys are ignored and
//! malformed values fall back to defaults rather than failing startup.

use crate::domain::WritingGoals;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use toml::Value as TomlValue;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub goals: WritingGoals,
    pub theme: Option<String>,
    pub db_path: Option<PathBuf>,
}

/// Load configuration from disk. A missing or unreadable file yields the
/// default configuration.
pub fn load() -> Config {
    let Ok(path) = config_path() else {
        return Config::default();
    };
    match fs::read_to_string(path) {
        Ok(text) => parse(&text),
        Err(_) => Config::default(),
    }
}

/// Parse a configuration document.
pub fn parse(text: &str) -> Config {
    let Ok(value) = text.parse::<TomlValue>() else {
        return Config::default();
    };
    let Some(table) = value.as_table() else {
        return Config::default();
    };

    let theme = table
        .get("theme")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let db_path = table
        .get("database")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);

    let goals = match table.get("goals").and_then(|v| v.as_table()) {
        Some(goals) => WritingGoals {
            target_word_count: read_count(goals.get("target_word_count")),
            daily_word_count: read_count(goals.get("daily_word_count")),
            target_date: goals
                .get("target_date")
                .and_then(|v| v.as_str())
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
        },
        None => WritingGoals::default(),
    };

    Config {
        goals,
        theme,
        db_path,
    }
}

/// Goals are non-negative by contract; negative or non-integer values are
/// treated as unset.
fn read_count(value: Option<&TomlValue>) -> Option<u32> {
    value
        .and_then(|v| v.as_integer())
        .and_then(|n| u32::try_from(n).ok())
}

fn config_path() -> Result<PathBuf, String> {
    let dir = dirs::config_dir().ok_or_else(|| "config dir not found".to_string())?;
    Ok(dir.join("redline").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = parse(
            r#"
            theme = "github-light"
            database = "/tmp/redline-test.db"

            [goals]
            target_word_count = 2000
            daily_word_count = 500
            target_date = "2026-09-01"
            "#,
        );
        assert_eq!(config.theme.as_deref(), Some("github-light"));
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/redline-test.db")));
        assert_eq!(config.goals.target_word_count, Some(2000));
        assert_eq!(config.goals.daily_word_count, Some(500));
        assert_eq!(
            config.goals.target_date,
            NaiveDate::parse_from_str("2026-09-01", "%Y-%m-%d").ok()
        );
    }

    #[test]
    fn empty_config_yields_defaults() {
        assert_eq!(parse(""), Config::default());
        assert!(parse("").goals.is_empty());
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = parse(
            r#"
            [goals]
            target_word_count = -100
            target_date = "next tuesday"
            "#,
        );
        assert_eq!(config.goals.target_word_count, None);
        assert_eq!(config.goals.target_date, None);
    }

    #[test]
    fn invalid_toml_yields_defaults() {
        assert_eq!(parse("not [valid toml"), Config::default());
    }

    #[test]
    fn partial_goals_are_kept() {
        let config = parse("[goals]\ndaily_word_count = 300\n");
        assert_eq!(config.goals.daily_word_count, Some(300));
        assert_eq!(config.goals.target_word_count, None);
    }
}
