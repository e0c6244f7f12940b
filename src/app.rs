//! Application state machine.
//!
//! Holds the current view, the loaded snapshot history, and the cached
//! comparison. Pure with respect to the terminal: rendering goes through
//! the ui modules and all I/O goes through the ports.

use crate::domain::diff::{compute_diff, summarize};
use crate::domain::progress::classify_streak;
use crate::domain::{count_words, DiffSegment, DiffSummary, Snapshot, StreakBadge, WritingGoals};
use crate::keymap::{build_default_keymap, Action, Context, Keymap};
use crate::ports::{DraftSource, DraftWatcher, KeyEvent, Terminal, TerminalEvent, VersionStore};
use crate::ui;
use anyhow::Result;
use ratatui::{
    layout::{Constraint, Layout},
    widgets::TableState,
    Frame,
};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Versions,
    Diff,
    Progress,
    Help,
}

/// The active comparison: one snapshot against the current draft.
struct DiffState {
    /// Index into the newest-first snapshot list.
    index: usize,
    version: u64,
    segments: Vec<DiffSegment>,
    summary: DiffSummary,
}

pub struct App<'a> {
    draft: &'a dyn DraftSource,
    store: &'a dyn VersionStore,

    snapshots: Vec<Snapshot>,
    current_content: String,
    current_words: usize,
    goals: WritingGoals,
    streak: StreakBadge,

    view: View,
    previous_view: View,
    selected: usize,
    scroll: usize,
    diff: Option<DiffState>,
    status: Option<String>,
    should_quit: bool,

    keymap: Keymap,
    table_state: TableState,
    // Body dimensions from the last render, for paging and scroll clamping.
    diff_width: usize,
    diff_height: usize,
}

impl<'a> App<'a> {
    pub fn new(
        draft: &'a dyn DraftSource,
        store: &'a dyn VersionStore,
        goals: WritingGoals,
    ) -> Result<Self> {
        let current_content = draft.load()?;
        let current_words = count_words(&current_content);
        let snapshots = store.snapshots(draft.id())?;
        let today = chrono::Local::now().date_naive();
        let streak = classify_streak(store.current_streak(draft.id(), today)?);

        Ok(Self {
            draft,
            store,
            snapshots,
            current_content,
            current_words,
            goals,
            streak,
            view: View::Versions,
            previous_view: View::Versions,
            selected: 0,
            scroll: 0,
            diff: None,
            status: None,
            should_quit: false,
            keymap: build_default_keymap(),
            table_state: TableState::default(),
            diff_width: 76,
            diff_height: 20,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn active_contexts(&self) -> Vec<Context> {
        let mut contexts = vec![Context::Global];
        match self.view {
            View::Versions => contexts.push(Context::VersionList),
            View::Diff => contexts.push(Context::DiffView),
            View::Progress => contexts.push(Context::ProgressView),
            View::Help => contexts.push(Context::Help),
        }
        contexts
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.status = None;

        let Some(action) = self
            .keymap
            .lookup(key.code, key.modifiers, &self.active_contexts())
        else {
            return Ok(());
        };

        match action {
            Action::MoveDown => self.move_down(1),
            Action::MoveUp => self.move_up(1),
            Action::PageDown => self.move_down(self.diff_height),
            Action::PageUp => self.move_up(self.diff_height),
            Action::GotoTop => self.goto_top(),
            Action::GotoBottom => self.goto_bottom(),
            Action::OlderVersion => self.step_version(1),
            Action::NewerVersion => self.step_version(-1),
            Action::CompareSelected => self.open_diff(self.selected),
            Action::CompareLatest => self.open_diff(0),
            Action::ShowProgress => self.view = View::Progress,
            Action::Back => self.go_back(),
            Action::SaveSnapshot => self.save_snapshot()?,
            Action::Refresh => self.reload_draft()?,
            Action::ShowHelp => {
                self.previous_view = self.view;
                self.view = View::Help;
            }
            Action::DismissHelp => self.view = self.previous_view,
            Action::Quit => self.should_quit = true,
        }

        Ok(())
    }

    fn move_down(&mut self, step: usize) {
        match self.view {
            View::Versions => {
                if !self.snapshots.is_empty() {
                    self.selected = (self.selected + step).min(self.snapshots.len() - 1);
                }
            }
            View::Diff => {
                self.scroll = (self.scroll + step).min(self.max_scroll());
            }
            _ => {}
        }
    }

    fn move_up(&mut self, step: usize) {
        match self.view {
            View::Versions => self.selected = self.selected.saturating_sub(step),
            View::Diff => self.scroll = self.scroll.saturating_sub(step),
            _ => {}
        }
    }

    fn goto_top(&mut self) {
        match self.view {
            View::Versions => self.selected = 0,
            View::Diff => self.scroll = 0,
            _ => {}
        }
    }

    fn goto_bottom(&mut self) {
        match self.view {
            View::Versions => self.selected = self.snapshots.len().saturating_sub(1),
            View::Diff => self.scroll = self.max_scroll(),
            _ => {}
        }
    }

    fn max_scroll(&self) -> usize {
        let Some(diff) = &self.diff else { return 0 };
        ui::diff::line_count(&diff.segments, self.diff_width).saturating_sub(1)
    }

    /// Open the comparison of `snapshots[index]` against the current draft.
    fn open_diff(&mut self, index: usize) {
        let Some(snapshot) = self.snapshots.get(index) else {
            self.status = Some("No snapshots to compare. Press s to save one.".to_string());
            return;
        };

        let segments = compute_diff(&snapshot.content, &self.current_content);
        let summary = summarize(&segments);
        self.diff = Some(DiffState {
            index,
            version: snapshot.version,
            segments,
            summary,
        });
        self.scroll = 0;
        self.view = View::Diff;
    }

    /// Step to an older (+1) or newer (-1) version while comparing.
    fn step_version(&mut self, direction: i64) {
        let Some(diff) = &self.diff else { return };
        let next = diff.index as i64 + direction;
        if next < 0 || next as usize >= self.snapshots.len() {
            return;
        }
        self.selected = next as usize;
        self.open_diff(next as usize);
    }

    fn go_back(&mut self) {
        match self.view {
            View::Diff | View::Progress => self.view = View::Versions,
            View::Help => self.view = self.previous_view,
            View::Versions => {}
        }
    }

    fn save_snapshot(&mut self) -> Result<()> {
        let snapshot = self
            .store
            .save_snapshot(self.draft.id(), &self.current_content)?;
        let today = chrono::Local::now().date_naive();
        self.store
            .record_writing_day(self.draft.id(), today, self.current_words)?;

        self.status = Some(format!(
            "Saved v{} ({} words)",
            snapshot.version, snapshot.word_count
        ));
        self.refresh_history()?;
        Ok(())
    }

    /// Re-read the draft from disk and invalidate the cached comparison.
    pub fn reload_draft(&mut self) -> Result<()> {
        self.current_content = self.draft.load()?;
        self.current_words = count_words(&self.current_content);

        if let Some(diff) = &self.diff {
            let index = diff.index;
            if self.view == View::Diff {
                self.open_diff(index);
            } else {
                self.diff = None;
            }
        }
        Ok(())
    }

    fn refresh_history(&mut self) -> Result<()> {
        self.snapshots = self.store.snapshots(self.draft.id())?;
        let today = chrono::Local::now().date_naive();
        self.streak = classify_streak(self.store.current_streak(self.draft.id(), today)?);
        if self.selected >= self.snapshots.len() {
            self.selected = self.snapshots.len().saturating_sub(1);
        }
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let view = if self.view == View::Help {
            self.previous_view
        } else {
            self.view
        };

        match view {
            View::Versions | View::Help => self.render_versions(frame),
            View::Diff => self.render_diff(frame),
            View::Progress => {
                ui::progress::render(
                    frame,
                    area,
                    self.draft.name(),
                    self.current_words,
                    &self.goals,
                    self.streak,
                );
            }
        }

        if self.view == View::Help {
            ui::help::render(frame, area, &self.keymap);
        }
    }

    fn render_versions(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.area());

        ui::versions::render(
            frame,
            chunks[0],
            &self.snapshots,
            self.selected,
            self.draft.name(),
            self.current_words,
            &mut self.table_state,
        );

        match &self.status {
            Some(message) => ui::versions::render_status(frame, chunks[1], message),
            None => ui::versions::render_help(frame, chunks[1]),
        }
    }

    fn render_diff(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.diff_width = (area.width.saturating_sub(4) as usize).max(8);
        self.diff_height = area.height.saturating_sub(4) as usize;

        if let Some(diff) = &self.diff {
            ui::diff::render(
                frame,
                area,
                self.draft.name(),
                diff.version,
                &diff.segments,
                &diff.summary,
                self.scroll,
            );
        }
    }
}

/// Main event loop: draw, absorb file changes, dispatch keys.
pub fn run<T: Terminal>(
    terminal: &mut T,
    draft: &dyn DraftSource,
    store: &dyn VersionStore,
    watcher: Option<&dyn DraftWatcher>,
    goals: WritingGoals,
) -> Result<()> {
    let mut app = App::new(draft, store, goals)?;

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if let Some(watcher) = watcher {
            if watcher.has_changes() {
                watcher.clear_changes();
                app.reload_draft()?;
            }
        }

        if let Some(event) = terminal.poll_event(POLL_INTERVAL)? {
            match event {
                TerminalEvent::Key(key) => app.handle_key(key)?,
                TerminalEvent::Resize(_, _) => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{KeyCode, KeyModifiers};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct FakeDraft {
        content: Mutex<String>,
    }

    impl FakeDraft {
        fn new(content: &str) -> Self {
            Self {
                content: Mutex::new(content.to_string()),
            }
        }

        fn set_content(&self, content: &str) {
            *self.content.lock().unwrap() = content.to_string();
        }
    }

    impl DraftSource for FakeDraft {
        fn id(&self) -> &str {
            "fake-draft"
        }

        fn name(&self) -> &str {
            "draft.md"
        }

        fn load(&self) -> Result<String> {
            Ok(self.content.lock().unwrap().clone())
        }
    }

    #[derive(Default)]
    struct FakeStore {
        snapshots: Mutex<Vec<Snapshot>>,
        days: Mutex<Vec<NaiveDate>>,
        streak: u32,
    }

    impl FakeStore {
        fn with_snapshots(contents: &[&str]) -> Self {
            let store = Self::default();
            {
                let mut snapshots = store.snapshots.lock().unwrap();
                for (i, content) in contents.iter().enumerate() {
                    snapshots.push(Snapshot {
                        version: (i + 1) as u64,
                        content: content.to_string(),
                        word_count: count_words(content),
                        created_at: i as i64,
                    });
                }
            }
            store
        }
    }

    impl VersionStore for FakeStore {
        fn save_snapshot(&self, _draft_id: &str, content: &str) -> Result<Snapshot> {
            let mut snapshots = self.snapshots.lock().unwrap();
            let version = snapshots.iter().map(|s| s.version).max().unwrap_or(0) + 1;
            let snapshot = Snapshot {
                version,
                content: content.to_string(),
                word_count: count_words(content),
                created_at: 0,
            };
            snapshots.push(snapshot.clone());
            Ok(snapshot)
        }

        fn snapshots(&self, _draft_id: &str) -> Result<Vec<Snapshot>> {
            let mut snapshots = self.snapshots.lock().unwrap().clone();
            snapshots.sort_by(|a, b| b.version.cmp(&a.version));
            Ok(snapshots)
        }

        fn snapshot(&self, _draft_id: &str, version: u64) -> Result<Option<Snapshot>> {
            Ok(self
                .snapshots
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.version == version)
                .cloned())
        }

        fn record_writing_day(
            &self,
            _draft_id: &str,
            day: NaiveDate,
            _word_count: usize,
        ) -> Result<()> {
            self.days.lock().unwrap().push(day);
            Ok(())
        }

        fn current_streak(&self, _draft_id: &str, _today: NaiveDate) -> Result<u32> {
            Ok(self.streak)
        }
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key_code(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn starts_in_version_list_with_newest_selected() {
        let draft = FakeDraft::new("one two three");
        let store = FakeStore::with_snapshots(&["one", "one two"]);
        let app = App::new(&draft, &store, WritingGoals::default()).unwrap();

        assert_eq!(app.view, View::Versions);
        assert_eq!(app.selected, 0);
        assert_eq!(app.snapshots[0].version, 2);
        assert_eq!(app.current_words, 3);
    }

    #[test]
    fn navigation_clamps_to_snapshot_list() {
        let draft = FakeDraft::new("text");
        let store = FakeStore::with_snapshots(&["a", "b"]);
        let mut app = App::new(&draft, &store, WritingGoals::default()).unwrap();

        app.handle_key(key('j')).unwrap();
        assert_eq!(app.selected, 1);
        app.handle_key(key('j')).unwrap();
        assert_eq!(app.selected, 1);
        app.handle_key(key('k')).unwrap();
        app.handle_key(key('k')).unwrap();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn enter_opens_comparison_of_selected_version() {
        let draft = FakeDraft::new("Hello brave world");
        let store = FakeStore::with_snapshots(&["Hello world"]);
        let mut app = App::new(&draft, &store, WritingGoals::default()).unwrap();

        app.handle_key(key_code(KeyCode::Enter)).unwrap();

        assert_eq!(app.view, View::Diff);
        let diff = app.diff.as_ref().unwrap();
        assert_eq!(diff.version, 1);
        assert_eq!(diff.summary.words_added, 1);
        assert_eq!(diff.summary.words_removed, 0);
        assert_eq!(diff.summary.words_unchanged, 2);
    }

    #[test]
    fn comparing_without_snapshots_sets_a_status_message() {
        let draft = FakeDraft::new("text");
        let store = FakeStore::default();
        let mut app = App::new(&draft, &store, WritingGoals::default()).unwrap();

        app.handle_key(key_code(KeyCode::Enter)).unwrap();

        assert_eq!(app.view, View::Versions);
        assert!(app.status.is_some());
    }

    #[test]
    fn save_snapshot_appends_a_version_and_records_the_day() {
        let draft = FakeDraft::new("fresh words here");
        let store = FakeStore::with_snapshots(&["old"]);
        let mut app = App::new(&draft, &store, WritingGoals::default()).unwrap();

        app.handle_key(key('s')).unwrap();

        assert_eq!(app.snapshots.len(), 2);
        assert_eq!(app.snapshots[0].version, 2);
        assert_eq!(app.snapshots[0].word_count, 3);
        assert_eq!(store.days.lock().unwrap().len(), 1);
        assert!(app.status.as_deref().unwrap().contains("Saved v2"));
    }

    #[test]
    fn stepping_through_versions_in_the_comparison() {
        let draft = FakeDraft::new("current text");
        let store = FakeStore::with_snapshots(&["v one", "v two", "v three"]);
        let mut app = App::new(&draft, &store, WritingGoals::default()).unwrap();

        app.handle_key(key_code(KeyCode::Enter)).unwrap();
        assert_eq!(app.diff.as_ref().unwrap().version, 3);

        // n walks to older versions, p back to newer
        app.handle_key(key('n')).unwrap();
        assert_eq!(app.diff.as_ref().unwrap().version, 2);
        app.handle_key(key('n')).unwrap();
        assert_eq!(app.diff.as_ref().unwrap().version, 1);
        app.handle_key(key('n')).unwrap();
        assert_eq!(app.diff.as_ref().unwrap().version, 1);
        app.handle_key(key('p')).unwrap();
        assert_eq!(app.diff.as_ref().unwrap().version, 2);
    }

    #[test]
    fn reload_recomputes_the_open_comparison() {
        let draft = FakeDraft::new("Hello world");
        let store = FakeStore::with_snapshots(&["Hello world"]);
        let mut app = App::new(&draft, &store, WritingGoals::default()).unwrap();

        app.handle_key(key_code(KeyCode::Enter)).unwrap();
        assert_eq!(app.diff.as_ref().unwrap().summary.words_added, 0);

        draft.set_content("Hello brave world");
        app.reload_draft().unwrap();

        assert_eq!(app.current_words, 3);
        assert_eq!(app.diff.as_ref().unwrap().summary.words_added, 1);
    }

    #[test]
    fn esc_returns_to_the_version_list() {
        let draft = FakeDraft::new("text");
        let store = FakeStore::with_snapshots(&["text"]);
        let mut app = App::new(&draft, &store, WritingGoals::default()).unwrap();

        app.handle_key(key('p')).unwrap();
        assert_eq!(app.view, View::Progress);
        app.handle_key(key_code(KeyCode::Esc)).unwrap();
        assert_eq!(app.view, View::Versions);
    }

    #[test]
    fn help_overlay_remembers_the_underlying_view() {
        let draft = FakeDraft::new("text");
        let store = FakeStore::with_snapshots(&["text"]);
        let mut app = App::new(&draft, &store, WritingGoals::default()).unwrap();

        app.handle_key(key('p')).unwrap();
        app.handle_key(key('?')).unwrap();
        assert_eq!(app.view, View::Help);

        // q dismisses help instead of quitting
        app.handle_key(key('q')).unwrap();
        assert_eq!(app.view, View::Progress);
        assert!(!app.should_quit());
    }

    #[test]
    fn q_quits_from_the_version_list() {
        let draft = FakeDraft::new("text");
        let store = FakeStore::default();
        let mut app = App::new(&draft, &store, WritingGoals::default()).unwrap();

        app.handle_key(key('q')).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn streak_is_classified_from_the_store() {
        let draft = FakeDraft::new("text");
        let mut store = FakeStore::default();
        store.streak = 8;
        let app = App::new(&draft, &store, WritingGoals::default()).unwrap();

        assert_eq!(app.streak.days, 8);
        assert_eq!(app.streak.label, "On a roll");
    }
}
