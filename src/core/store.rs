//! Entry storage: one append-only table
//!
//! There is no update or delete. `load_all` is the only read path; every
//! analysis recomputes from it.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::{JournalError, Result};
use crate::types::{CrisisTier, Entry, EntryOrder, NewEntry, Reflection};

/// Storage collaborator for entries
pub trait EntryStore: Send + Sync {
    /// Persist an entry and return it with its assigned id
    fn append(&self, entry: NewEntry) -> Result<Entry>;

    /// Every stored entry in the requested order
    fn load_all(&self, order: EntryOrder) -> Result<Vec<Entry>>;

    fn count(&self) -> Result<usize> {
        Ok(self.load_all(EntryOrder::NewestFirst)?.len())
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS journal_entries (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp   TEXT NOT NULL,      -- RFC 3339, UTC
    entry       TEXT NOT NULL,
    sentiment   REAL NOT NULL,
    emotion     TEXT NOT NULL,
    crisis      TEXT NOT NULL DEFAULT 'none',
    reflection  TEXT                -- JSON Reflection, NULL when absent
);

CREATE INDEX IF NOT EXISTS idx_entries_timestamp ON journal_entries(timestamp);
"#;

/// SQLite-backed store.
///
/// Writes are serialised through the connection mutex.
pub struct SqliteEntryStore {
    conn: Mutex<Connection>,
}

impl SqliteEntryStore {
    /// Open (or create) the database file and apply the schema
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Private in-memory database
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| JournalError::Lock(e.to_string()))
    }
}

impl EntryStore for SqliteEntryStore {
    fn append(&self, entry: NewEntry) -> Result<Entry> {
        let reflection_json = entry
            .reflection
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO journal_entries (timestamp, entry, sentiment, emotion, crisis, reflection) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.timestamp.to_rfc3339(),
                entry.text,
                entry.sentiment,
                entry.emotion,
                entry.crisis.as_str(),
                reflection_json,
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, emotion = entry.emotion.as_str(), "entry stored");
        Ok(entry.into_entry(id))
    }

    fn load_all(&self, order: EntryOrder) -> Result<Vec<Entry>> {
        let sql = match order {
            EntryOrder::NewestFirst => {
                "SELECT id, timestamp, entry, sentiment, emotion, crisis, reflection \
                 FROM journal_entries ORDER BY timestamp DESC, id DESC"
            }
            EntryOrder::OldestFirst => {
                "SELECT id, timestamp, entry, sentiment, emotion, crisis, reflection \
                 FROM journal_entries ORDER BY timestamp ASC, id ASC"
            }
        };
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], row_to_entry)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM journal_entries", [], |r| r.get(0))?;
        Ok(n as usize)
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<Entry> {
    let timestamp: String = row.get(1)?;
    let crisis: String = row.get(5)?;
    let reflection: Option<String> = row.get(6)?;

    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;
    let reflection: Option<Reflection> = reflection
        .map(|json| serde_json::from_str(&json))
        .transpose()
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Entry {
        id: row.get(0)?,
        timestamp,
        text: row.get(2)?,
        sentiment: row.get(3)?,
        emotion: row.get(4)?,
        crisis: str_to_tier(&crisis),
        reflection,
    })
}

fn str_to_tier(s: &str) -> CrisisTier {
    match s {
        "critical" => CrisisTier::Critical,
        "high" => CrisisTier::High,
        "moderate" => CrisisTier::Moderate,
        _ => CrisisTier::None,
    }
}

/// Vec-backed store for tests and one-shot CLI runs
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: Mutex<Vec<Entry>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Entry>>> {
        self.entries
            .lock()
            .map_err(|e| JournalError::Lock(e.to_string()))
    }
}

impl EntryStore for MemoryEntryStore {
    fn append(&self, entry: NewEntry) -> Result<Entry> {
        let mut entries = self.lock()?;
        let stored = entry.into_entry(entries.len() as i64 + 1);
        entries.push(stored.clone());
        Ok(stored)
    }

    fn load_all(&self, order: EntryOrder) -> Result<Vec<Entry>> {
        let mut entries = self.lock()?.clone();
        entries.sort_by_key(|e| (e.timestamp, e.id));
        if order == EntryOrder::NewestFirst {
            entries.reverse();
        }
        Ok(entries)
    }
}
