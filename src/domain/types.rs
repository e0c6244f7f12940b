//! Pure data types for the revision comparison domain.
//! No I/O, no dependencies on external crates beyond std and chrono.

use std::fmt;

/// Count whitespace-delimited words in a piece of text.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A saved revision of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Strictly increasing per draft, assigned by the store.
    pub version: u64,
    pub content: String,
    pub word_count: usize,
    /// Unix timestamp in seconds. Immutable once written.
    pub created_at: i64,
}

impl Snapshot {
    pub fn relative_time(&self) -> String {
        let now = chrono::Utc::now().timestamp();
        let diff = now - self.created_at;

        if diff < 60 {
            "just now".to_string()
        } else if diff < 3600 {
            let mins = diff / 60;
            format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
        } else if diff < 86400 {
            let hours = diff / 3600;
            format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
        } else if diff < 604800 {
            let days = diff / 86400;
            format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
        } else if diff < 2592000 {
            let weeks = diff / 604800;
            format!("{} week{} ago", weeks, if weeks == 1 { "" } else { "s" })
        } else {
            let months = diff / 2592000;
            format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
        }
    }
}

/// Classification of one span of text between two revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Added,
    Removed,
    Unchanged,
}

impl SegmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Added => "added",
            SegmentKind::Removed => "removed",
            SegmentKind::Unchanged => "unchanged",
        }
    }
}

/// A maximal run of text with a single classification.
/// Text includes the interstitial whitespace of the original, so
/// concatenating removed+unchanged reconstructs the old text and
/// added+unchanged reconstructs the new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub text: String,
}

impl DiffSegment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn word_count(&self) -> usize {
        count_words(&self.text)
    }
}

/// Word counts derived from a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffSummary {
    pub words_added: usize,
    pub words_removed: usize,
    pub words_unchanged: usize,
}

impl DiffSummary {
    pub fn total_words(&self) -> usize {
        self.words_added + self.words_removed + self.words_unchanged
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+{} -{} ={}",
            self.words_added, self.words_removed, self.words_unchanged
        )
    }
}

/// Caller-supplied goal configuration. Absent fields disable the
/// corresponding progress section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WritingGoals {
    pub target_word_count: Option<u32>,
    pub daily_word_count: Option<u32>,
    pub target_date: Option<chrono::NaiveDate>,
}

impl WritingGoals {
    pub fn is_empty(&self) -> bool {
        self.target_word_count.is_none()
            && self.daily_word_count.is_none()
            && self.target_date.is_none()
    }
}

/// Streak tier thresholds: 0, 1, 2..=6, 7..=29, >=30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTier {
    None,
    Started,
    Building,
    Strong,
    Elite,
}

/// A classified streak with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakBadge {
    pub days: u32,
    pub tier: StreakTier,
    pub label: &'static str,
}
