//! Notify implementation of the DraftWatcher port.

use crate::ports::DraftWatcher;
use anyhow::{Context, Result};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub struct NotifyDraftWatcher {
    _watcher: RecommendedWatcher,
    has_changes: Arc<AtomicBool>,
}

impl NotifyDraftWatcher {
    /// Watch the directory containing the draft, flagging events that
    /// touch the draft itself. Watching the parent instead of the file
    /// keeps working when editors save via rename-and-replace.
    pub fn new(parent_dir: &Path, file_name: &std::ffi::OsStr) -> Result<Self> {
        let has_changes = Arc::new(AtomicBool::new(false));
        let has_changes_clone = has_changes.clone();
        let file_name: OsString = file_name.to_os_string();

        let config = Config::default().with_poll_interval(Duration::from_secs(1));

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    use notify::EventKind::*;
                    match event.kind {
                        Create(_) | Modify(_) | Remove(_) => {
                            let touches_draft = event
                                .paths
                                .iter()
                                .any(|p| p.file_name() == Some(file_name.as_os_str()));
                            if touches_draft {
                                has_changes_clone.store(true, Ordering::SeqCst);
                            }
                        }
                        _ => {}
                    }
                }
            },
            config,
        )
        .context("Failed to create file watcher")?;

        watcher
            .watch(parent_dir, RecursiveMode::NonRecursive)
            .context("Failed to start watching draft directory")?;

        Ok(Self {
            _watcher: watcher,
            has_changes,
        })
    }
}

impl DraftWatcher for NotifyDraftWatcher {
    fn has_changes(&self) -> bool {
        self.has_changes.load(Ordering::SeqCst)
    }

    fn clear_changes(&self) {
        self.has_changes.store(false, Ordering::SeqCst);
    }
}
