//! Embedded durable store for all dorofy data.
//!
//! Wraps a single SQLite database holding three collections: `tasks`
//! (keyed by id, ordered by an explicit position column), `sessions`
//! (append-only focus interval log, indexed by completion time) and
//! `settings` (arbitrary JSON values keyed by string). The store owns the
//! persisted bytes exclusively; repositories keep in-memory projections
//! and push changes through it.
//!
//! A `Store` is opened once per command and injected into every consumer,
//! so there is no ambient database singleton. `init` is idempotent and a
//! closed store can be re-initialized.

use crate::libs::data_storage::DataStorage;
use crate::libs::error::CoreError;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

pub const DB_FILE_NAME: &str = "dorofy.db";

const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id TEXT NOT NULL PRIMARY KEY,
    title TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    estimated_units INTEGER NOT NULL DEFAULT 1,
    completed_units INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL,
    completed_at INTEGER,
    position INTEGER NOT NULL DEFAULT 0
)";
const SCHEMA_SESSIONS: &str = "CREATE TABLE IF NOT EXISTS sessions (
    id TEXT NOT NULL PRIMARY KEY,
    completed_at INTEGER NOT NULL,
    duration INTEGER NOT NULL,
    task_id TEXT
)";
const SCHEMA_SESSIONS_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at)";
const SCHEMA_SETTINGS: &str = "CREATE TABLE IF NOT EXISTS settings (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL
)";

pub struct Store {
    path: PathBuf,
    conn: Option<Connection>,
}

impl Store {
    /// Opens (or creates) the database in the platform data directory.
    pub fn new() -> Result<Store, CoreError> {
        let path = DataStorage::new()
            .get_path(DB_FILE_NAME)
            .map_err(|e| CoreError::StorageUnavailable(e.to_string()))?;
        Store::open_at(path)
    }

    /// Opens (or creates) the database at an explicit path.
    pub fn open_at(path: PathBuf) -> Result<Store, CoreError> {
        let mut store = Store { path, conn: None };
        store.init()?;
        Ok(store)
    }

    /// Opens the connection and creates the schema if absent. Idempotent:
    /// calling on an already-open store is a no-op.
    pub fn init(&mut self) -> Result<(), CoreError> {
        if self.conn.is_some() {
            return Ok(());
        }
        let conn = Connection::open(&self.path).map_err(|e| CoreError::StorageUnavailable(e.to_string()))?;
        conn.execute(SCHEMA_TASKS, [])?;
        conn.execute(SCHEMA_SESSIONS, [])?;
        conn.execute(SCHEMA_SESSIONS_INDEX, [])?;
        conn.execute(SCHEMA_SETTINGS, [])?;
        self.conn = Some(conn);
        Ok(())
    }

    /// Releases the underlying connection. Operations after `close` fail
    /// until `init` is called again.
    pub fn close(&mut self) {
        self.conn = None;
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    pub(crate) fn conn(&self) -> Result<&Connection, CoreError> {
        self.conn
            .as_ref()
            .ok_or_else(|| CoreError::StorageUnavailable("store is closed".to_string()))
    }

    pub(crate) fn conn_mut(&mut self) -> Result<&mut Connection, CoreError> {
        self.conn
            .as_mut()
            .ok_or_else(|| CoreError::StorageUnavailable("store is closed".to_string()))
    }

    /// Reads a JSON-serialized setting. Returns `None` when the key is
    /// absent.
    pub fn get_setting<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => {
                let raw: String = row.get(0)?;
                let value = serde_json::from_str(&raw)
                    .map_err(|_| CoreError::InvalidFormat("settings value"))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Writes a JSON-serializable setting, replacing any previous value.
    pub fn set_setting<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), CoreError> {
        let raw = serde_json::to_string(value).map_err(|_| CoreError::InvalidFormat("settings value"))?;
        self.conn()?
            .execute("INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)", params![key, raw])?;
        Ok(())
    }

    pub fn remove_setting(&mut self, key: &str) -> Result<(), CoreError> {
        self.conn()?.execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// All setting keys currently stored, in insertion order.
    pub fn setting_keys(&self) -> Result<Vec<String>, CoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT key FROM settings ORDER BY rowid")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}
