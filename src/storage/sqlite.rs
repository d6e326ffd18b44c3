//! SQLite storage backend for complaint records

use super::traits::{ComplaintStore, OpenStore, StorageError, StorageResult};
use crate::complaint::{Category, ComplaintId, ComplaintRecord, NewComplaint};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Raw row as read from the `complaints` table, before category parsing.
type RawRow = (i64, String, String, String);

/// SQLite-backed complaint store
///
/// Holds one long-lived connection for the life of the process. Every
/// operation takes the connection guard for its own scope only, so the
/// guard is released on all exit paths, including errors.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Ensure the `complaints` table exists. Idempotent.
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS complaints (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                complaint TEXT,
                summary TEXT,
                category TEXT
            );

            -- Readers in another process are not blocked by a writer
            PRAGMA journal_mode = WAL;
            "#,
        )?;
        tracing::debug!("complaints schema ready");
        Ok(())
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    fn row_to_record((id, complaint, summary, label): RawRow) -> StorageResult<ComplaintRecord> {
        let category = label
            .parse::<Category>()
            .map_err(|_| StorageError::InvalidCategory { id, label })?;
        Ok(ComplaintRecord {
            id: ComplaintId::from_raw(id),
            complaint,
            summary,
            category,
        })
    }
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl ComplaintStore for SqliteStore {
    fn save(&self, complaint: &NewComplaint) -> StorageResult<ComplaintId> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO complaints (complaint, summary, category) VALUES (?1, ?2, ?3)",
            params![
                complaint.complaint,
                complaint.summary,
                complaint.category.label()
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(ComplaintId::from_raw(id))
    }

    fn list_all(&self) -> StorageResult<Vec<ComplaintRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, complaint, summary, category FROM complaints ORDER BY id DESC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<Result<Vec<RawRow>, _>>()?;

        rows.into_iter().map(Self::row_to_record).collect()
    }

    fn count(&self) -> StorageResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM complaints", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
