//! SQLite-backed record persistence

use crate::StoreError;
use chatlead_domain::traits::RecordStore;
use chatlead_domain::{ConversationId, ExtractedRecord};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// SQLite-based implementation of RecordStore
///
/// Records are stored as JSON documents keyed by conversation id, so the
/// schema does not change when the record gains a field.
///
/// # Thread Safety
///
/// The connection sits behind a mutex; a single store can be shared by every
/// conversation of an [`Accumulator`](crate::Accumulator).
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Create a new SqliteRecordStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chatlead_store::SqliteRecordStore;
    ///
    /// let store = SqliteRecordStore::new("chatlead.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }

    fn parse_id(raw: String) -> Result<ConversationId, StoreError> {
        ConversationId::new(raw).map_err(StoreError::InvalidData)
    }
}

impl RecordStore for SqliteRecordStore {
    type Error = StoreError;

    fn load(&self, id: &ConversationId) -> Result<Option<ExtractedRecord>, Self::Error> {
        let conn = self.conn()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT record FROM records WHERE conversation_id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        json.map(|j| serde_json::from_str(&j))
            .transpose()
            .map_err(StoreError::from)
    }

    fn save(&self, id: &ConversationId, record: &ExtractedRecord) -> Result<(), Self::Error> {
        let json = serde_json::to_string(record)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO records (conversation_id, record, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(conversation_id) DO UPDATE SET
             record = excluded.record, updated_at = excluded.updated_at",
            params![id.as_str(), json, Self::now()],
        )?;
        debug!("Saved record for {}", id);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<(ConversationId, ExtractedRecord)>, Self::Error> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT conversation_id, record FROM records ORDER BY conversation_id")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, json)| -> Result<_, StoreError> {
                Ok((Self::parse_id(id)?, serde_json::from_str(&json)?))
            })
            .collect()
    }

    fn mark_seen(&self, id: &ConversationId, message_id: &str) -> Result<bool, Self::Error> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO seen_messages (conversation_id, message_id) VALUES (?1, ?2)",
            params![id.as_str(), message_id],
        )?;
        Ok(inserted == 1)
    }
}
