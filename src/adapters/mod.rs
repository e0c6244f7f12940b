pub mod crossterm_adapter;
pub mod fs_draft;
pub mod notify_draft_watcher;
pub mod sqlite_version_store;

pub use crossterm_adapter::CrosstermTerminal;
pub use fs_draft::FsDraft;
pub use notify_draft_watcher::NotifyDraftWatcher;
pub use sqlite_version_store::SqliteVersionStore;
