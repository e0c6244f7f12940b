//! redline - revision history and progress TUI for prose drafts
//!
//! Tracks versions of a text file in SQLite, shows word-level diffs
//! between any saved version and the current draft, and keeps score on
//! writing goals and streaks.

mod adapters;
mod app;
mod config;
mod domain;
mod keymap;
mod ports;
mod ui;

use adapters::{CrosstermTerminal, FsDraft, NotifyDraftWatcher, SqliteVersionStore};
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use domain::progress::{classify_streak, daily_progress_percent, goal_progress_percent};
use domain::{count_words, WritingGoals};
use ports::{DraftSource, VersionStore};
use std::io;
use std::panic;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "redline")]
#[command(about = "Track revisions and writing progress for a prose draft")]
#[command(version)]
struct Args {
    /// The draft file to track
    draft: PathBuf,

    /// Color theme (github-dark, github-light, catppuccin-mocha, catppuccin-latte)
    #[arg(short, long)]
    theme: Option<String>,

    /// Path to the history database (default: platform data dir)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Target word count for the whole draft
    #[arg(long)]
    goal: Option<u32>,

    /// Target word count per day
    #[arg(long)]
    daily_goal: Option<u32>,

    /// Target completion date (YYYY-MM-DD)
    #[arg(long)]
    target_date: Option<chrono::NaiveDate>,

    /// Save a snapshot of the draft and exit (no TUI)
    #[arg(short, long)]
    snapshot: bool,

    /// Print the diff against the latest snapshot as JSON and exit
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Restore the terminal before printing a panic message
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let args = Args::parse();
    let config = config::load();

    if let Err(e) = ui::theme::init(args.theme.as_deref(), config.theme.as_deref()) {
        eprintln!("Warning: {}. Falling back to the default theme.", e);
    }

    let goals = WritingGoals {
        target_word_count: args.goal.or(config.goals.target_word_count),
        daily_word_count: args.daily_goal.or(config.goals.daily_word_count),
        target_date: args.target_date.or(config.goals.target_date),
    };

    let draft = FsDraft::open(&args.draft)
        .with_context(|| format!("Failed to open draft {}", args.draft.display()))?;

    let db_path = args.db.or(config.db_path);
    let store = match &db_path {
        Some(path) => SqliteVersionStore::open_at(path),
        None => SqliteVersionStore::new(),
    }
    .context("Failed to open the history database")?;

    if args.snapshot {
        return save_and_exit(&draft, &store);
    }

    if args.json {
        return print_json(&draft, &store, &goals);
    }

    let watcher = match (draft.parent_dir(), draft.file_name()) {
        (Some(dir), Some(name)) => match NotifyDraftWatcher::new(dir, name) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                eprintln!("Warning: Could not watch the draft for changes: {}", e);
                None
            }
        },
        _ => None,
    };

    let mut terminal = CrosstermTerminal::new().context("Failed to initialize terminal")?;

    app::run(
        &mut terminal,
        &draft,
        &store,
        watcher.as_ref().map(|w| w as &dyn ports::DraftWatcher),
        goals,
    )
}

/// `--snapshot`: save the current draft as the next version and report it.
fn save_and_exit(draft: &FsDraft, store: &SqliteVersionStore) -> Result<()> {
    let content = draft.load()?;
    let snapshot = store.save_snapshot(draft.id(), &content)?;
    let today = chrono::Local::now().date_naive();
    store.record_writing_day(draft.id(), today, snapshot.word_count)?;

    println!(
        "Saved {} as v{} ({} words)",
        draft.name(),
        snapshot.version,
        snapshot.word_count
    );
    Ok(())
}

/// `--json`: diff the latest snapshot against the current draft and emit a
/// machine-readable report on stdout.
fn print_json(draft: &FsDraft, store: &SqliteVersionStore, goals: &WritingGoals) -> Result<()> {
    let content = draft.load()?;
    let current_words = count_words(&content);

    let snapshots = store.snapshots(draft.id())?;
    let latest = snapshots.first();
    let base = latest.map(|s| s.content.as_str()).unwrap_or("");

    let segments = domain::diff::compute_diff(base, &content);
    let summary = domain::diff::summarize(&segments);

    let today = chrono::Local::now().date_naive();
    let streak = classify_streak(store.current_streak(draft.id(), today)?);

    let report = serde_json::json!({
        "draft": draft.name(),
        "base_version": latest.map(|s| s.version),
        "current_words": current_words,
        "segments": segments.iter().map(|s| serde_json::json!({
            "kind": s.kind.as_str(),
            "text": s.text,
        })).collect::<Vec<_>>(),
        "summary": {
            "words_added": summary.words_added,
            "words_removed": summary.words_removed,
            "words_unchanged": summary.words_unchanged,
        },
        "progress": {
            "goal_percent": goal_progress_percent(current_words, goals.target_word_count),
            "daily_percent": daily_progress_percent(current_words, goals.daily_word_count),
        },
        "streak": {
            "days": streak.days,
            "label": streak.label,
        },
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
