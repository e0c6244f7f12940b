//! Draft watcher port (trait).
//! Defines the interface for noticing that the draft changed on disk.

/// Port for watching the draft file.
pub trait DraftWatcher: Send {
    /// Check if the draft has pending changes (non-blocking).
    fn has_changes(&self) -> bool;

    /// Clear the changes flag after a reload.
    fn clear_changes(&self);
}
