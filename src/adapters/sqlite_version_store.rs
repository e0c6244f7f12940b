//! SQLite implementation of the VersionStore port.

use crate::domain::{count_words, Snapshot};
use crate::ports::VersionStore;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

pub struct SqliteVersionStore {
    conn: Mutex<Connection>,
}

impl SqliteVersionStore {
    /// Create a store backed by the default database in the user's data
    /// directory.
    pub fn new() -> Result<Self> {
        Self::open_at(&Self::db_path()?)
    }

    /// Create a store backed by a specific database file.
    pub fn open_at(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }
        let conn = Connection::open(db_path).context("Failed to open SQLite database")?;
        Self::with_connection(conn)
    }

    /// Create an in-memory store. Used by tests and `--db :memory:`.
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS snapshots (
                id INTEGER PRIMARY KEY,
                draft_id TEXT NOT NULL,
                version INTEGER NOT NULL,
                content TEXT NOT NULL,
                word_count INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                UNIQUE(draft_id, version)
            );
            CREATE INDEX IF NOT EXISTS idx_snapshots_draft
                ON snapshots(draft_id);

            CREATE TABLE IF NOT EXISTS writing_days (
                id INTEGER PRIMARY KEY,
                draft_id TEXT NOT NULL,
                day TEXT NOT NULL,
                word_count INTEGER NOT NULL,
                UNIQUE(draft_id, day)
            );
            CREATE INDEX IF NOT EXISTS idx_writing_days_draft
                ON writing_days(draft_id);
            ",
        )
        .context("Failed to initialize database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get the default database file path.
    fn db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().context("Could not find data directory")?;
        Ok(data_dir.join("redline").join("history.db"))
    }

    /// Get current timestamp in seconds.
    fn now_secs() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

impl VersionStore for SqliteVersionStore {
    fn save_snapshot(&self, draft_id: &str, content: &str) -> Result<Snapshot> {
        let conn = self.conn.lock().unwrap();

        // MAX+1 keeps version numbers strictly increasing even after rows
        // are deleted out of band.
        let next_version: i64 = conn.query_row(
            "SELECT COALESCE(MAX(version), 0) + 1 FROM snapshots WHERE draft_id = ?1",
            (draft_id,),
            |row| row.get(0),
        )?;

        let word_count = count_words(content);
        let created_at = Self::now_secs();

        conn.execute(
            "INSERT INTO snapshots (draft_id, version, content, word_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (draft_id, next_version, content, word_count as i64, created_at),
        )?;

        Ok(Snapshot {
            version: next_version as u64,
            content: content.to_string(),
            word_count,
            created_at,
        })
    }

    fn snapshots(&self, draft_id: &str) -> Result<Vec<Snapshot>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT version, content, word_count, created_at
             FROM snapshots
             WHERE draft_id = ?1
             ORDER BY version DESC",
        )?;

        let snapshots = stmt
            .query_map((draft_id,), |row| {
                Ok(Snapshot {
                    version: row.get::<_, i64>(0)? as u64,
                    content: row.get(1)?,
                    word_count: row.get::<_, i64>(2)? as usize,
                    created_at: row.get(3)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(snapshots)
    }

    fn snapshot(&self, draft_id: &str, version: u64) -> Result<Option<Snapshot>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT version, content, word_count, created_at
             FROM snapshots
             WHERE draft_id = ?1 AND version = ?2",
        )?;

        let result = stmt.query_row((draft_id, version as i64), |row| {
            Ok(Snapshot {
                version: row.get::<_, i64>(0)? as u64,
                content: row.get(1)?,
                word_count: row.get::<_, i64>(2)? as usize,
                created_at: row.get(3)?,
            })
        });

        match result {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn record_writing_day(&self, draft_id: &str, day: NaiveDate, word_count: usize) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO writing_days (draft_id, day, word_count)
             VALUES (?1, ?2, ?3)",
            (draft_id, day.to_string(), word_count as i64),
        )?;
        Ok(())
    }

    fn current_streak(&self, draft_id: &str, today: NaiveDate) -> Result<u32> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT day FROM writing_days WHERE draft_id = ?1")?;

        let days: HashSet<NaiveDate> = stmt
            .query_map((draft_id,), |row| row.get::<_, String>(0))?
            .filter_map(|r| r.ok())
            .filter_map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
            .collect();

        // A streak is still alive if the last activity was yesterday.
        let mut cursor = if days.contains(&today) {
            today
        } else {
            match today.pred_opt() {
                Some(yesterday) => yesterday,
                None => return Ok(0),
            }
        };

        let mut streak = 0;
        while days.contains(&cursor) {
            streak += 1;
            match cursor.pred_opt() {
                Some(prev) => cursor = prev,
                None => break,
            }
        }
        Ok(streak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn snapshots_get_increasing_versions() {
        let store = SqliteVersionStore::in_memory().unwrap();
        let first = store.save_snapshot("essay.md", "one").unwrap();
        let second = store.save_snapshot("essay.md", "one two").unwrap();
        assert_eq!(first.version, 1);
        assert_eq!(second.version, 2);
        assert_eq!(second.word_count, 2);

        let listed = store.snapshots("essay.md").unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].version, 2, "newest first");
    }

    #[test]
    fn snapshots_are_scoped_per_draft() {
        let store = SqliteVersionStore::in_memory().unwrap();
        store.save_snapshot("a.md", "alpha").unwrap();
        store.save_snapshot("b.md", "beta").unwrap();
        assert_eq!(store.snapshots("a.md").unwrap().len(), 1);
        assert_eq!(store.snapshots("b.md").unwrap().len(), 1);
    }

    #[test]
    fn snapshot_lookup_by_version() {
        let store = SqliteVersionStore::in_memory().unwrap();
        store.save_snapshot("essay.md", "hello world").unwrap();

        let found = store.snapshot("essay.md", 1).unwrap();
        assert_eq!(found.unwrap().content, "hello world");
        assert!(store.snapshot("essay.md", 99).unwrap().is_none());
    }

    #[test]
    fn streak_counts_consecutive_days_ending_today() {
        let store = SqliteVersionStore::in_memory().unwrap();
        for day in ["2026-08-21", "2026-08-22", "2026-08-23"] {
            store.record_writing_day("essay.md", date(day), 100).unwrap();
        }
        assert_eq!(store.current_streak("essay.md", date("2026-08-23")).unwrap(), 3);
    }

    #[test]
    fn streak_survives_no_activity_today() {
        let store = SqliteVersionStore::in_memory().unwrap();
        store.record_writing_day("essay.md", date("2026-08-22"), 100).unwrap();
        assert_eq!(store.current_streak("essay.md", date("2026-08-23")).unwrap(), 1);
    }

    #[test]
    fn gap_resets_the_streak() {
        let store = SqliteVersionStore::in_memory().unwrap();
        store.record_writing_day("essay.md", date("2026-08-19"), 100).unwrap();
        store.record_writing_day("essay.md", date("2026-08-20"), 100).unwrap();
        store.record_writing_day("essay.md", date("2026-08-23"), 100).unwrap();
        assert_eq!(store.current_streak("essay.md", date("2026-08-23")).unwrap(), 1);
    }

    #[test]
    fn no_activity_means_no_streak() {
        let store = SqliteVersionStore::in_memory().unwrap();
        assert_eq!(store.current_streak("essay.md", date("2026-08-23")).unwrap(), 0);
    }

    #[test]
    fn recording_the_same_day_twice_updates_in_place() {
        let store = SqliteVersionStore::in_memory().unwrap();
        store.record_writing_day("essay.md", date("2026-08-23"), 100).unwrap();
        store.record_writing_day("essay.md", date("2026-08-23"), 250).unwrap();
        assert_eq!(store.current_streak("essay.md", date("2026-08-23")).unwrap(), 1);
    }
}
