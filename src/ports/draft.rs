//! Draft source port (trait).
//! Defines the interface to the live draft the user is editing.

use anyhow::Result;

/// Port for reading the draft being tracked.
/// Implementations may read the filesystem or serve fixed text in tests.
pub trait DraftSource {
    /// Stable identifier for the draft (used to key store state).
    fn id(&self) -> &str;

    /// Short display name for titles.
    fn name(&self) -> &str;

    /// Load the current content of the draft.
    fn load(&self) -> Result<String>;
}
