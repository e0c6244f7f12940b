pub mod draft;
pub mod draft_watcher;
pub mod terminal;
pub mod version_store;

pub use draft::DraftSource;
pub use draft_watcher::DraftWatcher;
pub use terminal::{KeyCode, KeyEvent, KeyModifiers, Terminal, TerminalEvent};
pub use version_store::VersionStore;
