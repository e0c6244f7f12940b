pub mod diff;
pub mod progress;
pub mod types;

pub use types::{
    count_words, DiffSegment, DiffSummary, SegmentKind, Snapshot, StreakBadge, StreakTier,
    WritingGoals,
};
