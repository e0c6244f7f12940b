//! Version store port (trait).
//! Defines the interface for persisting snapshots and writing activity.

use crate::domain::Snapshot;
use anyhow::Result;
use chrono::NaiveDate;

/// Port for persisting draft history.
///
/// The store also owns streak accounting: it records which calendar days
/// saw writing activity and derives the current streak from them. The
/// domain layer only classifies the resulting integer.
pub trait VersionStore: Send + Sync {
    /// Save the content as the next snapshot of the draft.
    /// Version numbers are strictly increasing per draft, even after
    /// deletions.
    fn save_snapshot(&self, draft_id: &str, content: &str) -> Result<Snapshot>;

    /// All snapshots of a draft, newest first.
    fn snapshots(&self, draft_id: &str) -> Result<Vec<Snapshot>>;

    /// Look up one snapshot by version number.
    fn snapshot(&self, draft_id: &str, version: u64) -> Result<Option<Snapshot>>;

    /// Record writing activity for a calendar day (idempotent per day;
    /// the word count is overwritten with the latest value).
    fn record_writing_day(&self, draft_id: &str, day: NaiveDate, word_count: usize) -> Result<()>;

    /// Consecutive days of recorded activity ending at `today`, or at
    /// yesterday when today has no activity yet.
    fn current_streak(&self, draft_id: &str, today: NaiveDate) -> Result<u32>;
}
