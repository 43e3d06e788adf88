use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::info;

use crate::calibration::Change;
use crate::error::NetuiError;

/// A committed calibration value as listed by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub group: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub updated: String,
    pub comment: String,
}

/// Last committed value of one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredValue {
    pub kind: String,
    pub value: String,
}

/// SQLite store for committed calibration values.
/// Every commit appends rows; the newest row per entry is the active value.
/// All operations are synchronous (rusqlite is blocking).
/// Callers in async contexts should use `tokio::task::spawn_blocking`.
pub struct CalibrationStore {
    conn: Connection,
}

impl CalibrationStore {
    /// Create or open the calibration database at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self, NetuiError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        let store = Self::init(conn)?;
        info!("Opened calibration database at {:?}", db_path);
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, NetuiError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, NetuiError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS calibration (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                domain TEXT NOT NULL,
                name TEXT NOT NULL,
                type TEXT NOT NULL,
                value TEXT NOT NULL,
                updated TEXT NOT NULL,
                comment TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_calibration_entry ON calibration(domain, name)",
            [],
        )?;

        Ok(Self { conn })
    }

    /// Newest committed value for an entry, if it was ever committed.
    pub fn latest(&self, domain: &str, name: &str) -> Result<Option<StoredValue>, NetuiError> {
        let value = self
            .conn
            .query_row(
                "SELECT type, value FROM calibration
             WHERE domain = ?1 AND name = ?2
             ORDER BY id DESC LIMIT 1",
                params![domain, name],
                |row| {
                    Ok(StoredValue {
                        kind: row.get(0)?,
                        value: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(value)
    }

    /// Append one row per change, all stamped with the same time and comment.
    pub fn record(&mut self, changes: &[Change], comment: &str) -> Result<(), NetuiError> {
        let updated = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let tx = self.conn.transaction()?;
        for change in changes {
            tx.execute(
                "INSERT INTO calibration (domain, name, type, value, updated, comment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    change.domain,
                    change.name,
                    change.kind.code().to_string(),
                    change.value,
                    updated,
                    comment
                ],
            )?;
        }
        tx.commit()?;

        info!("Recorded {} calibration changes", changes.len());
        Ok(())
    }

    /// Committed values, newest first.
    pub fn history(&self, limit: usize) -> Result<Vec<HistoryEntry>, NetuiError> {
        let mut stmt = self.conn.prepare(
            "SELECT domain, name, type, value, updated, comment
             FROM calibration
             ORDER BY id DESC
             LIMIT ?1",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            Ok(HistoryEntry {
                group: row.get(0)?,
                name: row.get(1)?,
                kind: row.get(2)?,
                value: row.get(3)?,
                updated: row.get(4)?,
                comment: row.get(5)?,
            })
        })?;

        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueKind;
    use tempfile::TempDir;

    fn change(domain: &str, name: &str, value: &str) -> Change {
        Change {
            domain: domain.to_string(),
            name: name.to_string(),
            kind: ValueKind::Double,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_latest_returns_newest_row() {
        let mut store = CalibrationStore::open_in_memory().unwrap();
        store.record(&[change("steer", "center", "0.1")], "first").unwrap();
        store.record(&[change("steer", "center", "0.2")], "second").unwrap();

        let latest = store.latest("steer", "center").unwrap().unwrap();
        assert_eq!(latest.kind, "d");
        assert_eq!(latest.value, "0.2");
    }

    #[test]
    fn test_latest_missing_entry() {
        let store = CalibrationStore::open_in_memory().unwrap();
        assert!(store.latest("steer", "center").unwrap().is_none());
    }

    #[test]
    fn test_history_newest_first_with_limit() {
        let mut store = CalibrationStore::open_in_memory().unwrap();
        store
            .record(&[change("a", "x", "1"), change("a", "y", "2")], "batch")
            .unwrap();
        store.record(&[change("b", "z", "3")], "later").unwrap();

        let all = store.history(10).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "z");
        assert_eq!(all[0].comment, "later");
        assert_eq!(all[2].name, "x");
        assert_eq!(all[2].group, "a");

        let limited = store.history(1).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].value, "3");
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cal.db");
        {
            let mut store = CalibrationStore::open(&path).unwrap();
            store.record(&[change("a", "x", "5")], "keep").unwrap();
        }
        let store = CalibrationStore::open(&path).unwrap();
        assert_eq!(store.latest("a", "x").unwrap().unwrap().value, "5");
    }
}
