//! Filesystem implementation of the DraftSource port.

use crate::ports::DraftSource;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct FsDraft {
    path: PathBuf,
    id: String,
    name: String,
}

impl FsDraft {
    /// Open a draft file. The canonical path keys the store so the same
    /// draft resolves to the same history regardless of invocation cwd.
    pub fn open(path: &Path) -> Result<Self> {
        let canonical = path
            .canonicalize()
            .with_context(|| format!("Draft file not found: {}", path.display()))?;

        let name = canonical
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| canonical.display().to_string());

        Ok(Self {
            id: canonical.display().to_string(),
            path: canonical,
            name,
        })
    }

    /// Directory containing the draft, for the file watcher.
    pub fn parent_dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// File name of the draft, for filtering watcher events.
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }
}

impl DraftSource for FsDraft {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read draft: {}", self.path.display()))
    }
}
