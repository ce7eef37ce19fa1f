//! Whole-database export and import.
//!
//! A backup snapshot is a versioned JSON envelope carrying every
//! collection plus the settings that shape timer behavior. Import is
//! destructive by design: it validates the envelope first, then replaces
//! all existing data inside a single transaction, so a malformed or
//! partially-written file can never leave the store half-imported.

use super::sessions::write_sessions;
use super::store::Store;
use super::tasks::write_tasks;
use crate::libs::error::CoreError;
use crate::libs::session::SessionRecord;
use crate::libs::task::Task;
use chrono::Utc;
use rusqlite::{params, Transaction};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version stamp written into every exported snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Settings keys that live in dedicated top-level snapshot fields rather
/// than the free-form settings object.
const TIMER_STATE_KEY: &str = "timerState";
const ACTIVE_TASK_KEY: &str = "activeTaskId";
const MIGRATION_COMPLETE_KEY: &str = "migrationComplete";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    pub version: u32,
    pub timestamp: i64,
    pub app_version: String,
    pub tasks: Vec<Task>,
    pub session_history: Vec<SessionRecord>,
    pub timer_state: Option<Value>,
    pub active_task_id: Option<String>,
    pub settings: Value,
}

impl Store {
    /// Reads all three collections plus versioning metadata into one
    /// snapshot object.
    pub fn export_snapshot(&self) -> Result<BackupSnapshot, CoreError> {
        let tasks = self.get_tasks()?;
        let session_history = self.get_session_history()?;
        let timer_state = self.get_setting::<Value>(TIMER_STATE_KEY)?;
        let active_task_id = self.get_setting::<String>(ACTIVE_TASK_KEY)?;

        let mut settings = serde_json::Map::new();
        for key in self.setting_keys()? {
            if key == TIMER_STATE_KEY || key == ACTIVE_TASK_KEY || key == MIGRATION_COMPLETE_KEY {
                continue;
            }
            if let Some(value) = self.get_setting::<Value>(&key)? {
                settings.insert(key, value);
            }
        }

        Ok(BackupSnapshot {
            version: SNAPSHOT_VERSION,
            timestamp: Utc::now().timestamp_millis(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            tasks,
            session_history,
            timer_state,
            active_task_id,
            settings: Value::Object(settings),
        })
    }

    /// Replaces all existing data with the snapshot's contents.
    ///
    /// Validation happens before any mutation: a snapshot missing its
    /// `version` or `timestamp`, or carrying malformed collections, is
    /// rejected with `InvalidFormat` and the store is left untouched. The
    /// write itself runs in one transaction — on any failure nothing is
    /// committed. Returns the imported (task, session) counts.
    pub fn import_snapshot(&mut self, snapshot: &Value) -> Result<(usize, usize), CoreError> {
        let envelope = snapshot.as_object().ok_or(CoreError::InvalidFormat("object"))?;
        envelope
            .get("version")
            .and_then(Value::as_u64)
            .ok_or(CoreError::InvalidFormat("version"))?;
        envelope
            .get("timestamp")
            .and_then(Value::as_i64)
            .ok_or(CoreError::InvalidFormat("timestamp"))?;

        let tasks: Vec<Task> = match envelope.get("tasks") {
            Some(value) => serde_json::from_value(value.clone()).map_err(|_| CoreError::InvalidFormat("tasks"))?,
            None => Vec::new(),
        };
        let sessions: Vec<SessionRecord> = match envelope.get("sessionHistory") {
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|_| CoreError::InvalidFormat("sessionHistory"))?
            }
            None => Vec::new(),
        };
        let timer_state = envelope.get("timerState").filter(|v| !v.is_null()).cloned();
        let active_task_id = match envelope.get("activeTaskId").filter(|v| !v.is_null()) {
            Some(value) => Some(
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or(CoreError::InvalidFormat("activeTaskId"))?,
            ),
            None => None,
        };
        let settings = match envelope.get("settings").filter(|v| !v.is_null()) {
            Some(value) => value
                .as_object()
                .cloned()
                .ok_or(CoreError::InvalidFormat("settings"))?,
            None => serde_json::Map::new(),
        };

        let tx = self.conn_mut()?.transaction()?;
        write_tasks(&tx, &tasks)?;
        write_sessions(&tx, &sessions)?;
        tx.execute("DELETE FROM settings", [])?;
        if let Some(state) = &timer_state {
            put_setting(&tx, TIMER_STATE_KEY, state)?;
        }
        if let Some(id) = &active_task_id {
            put_setting(&tx, ACTIVE_TASK_KEY, &Value::String(id.clone()))?;
        }
        for (key, value) in &settings {
            put_setting(&tx, key, value)?;
        }
        tx.commit()?;

        Ok((tasks.len(), sessions.len()))
    }

    /// Transactionally installs data recovered from the legacy flat store.
    /// Also sets the migration-complete flag so the adapter never runs
    /// twice against an already-populated store.
    pub fn import_legacy(
        &mut self,
        tasks: Option<&[Task]>,
        timer_state: Option<&Value>,
        active_task_id: Option<&str>,
        extended_sessions: Option<bool>,
    ) -> Result<(), CoreError> {
        let tx = self.conn_mut()?.transaction()?;
        if let Some(tasks) = tasks {
            write_tasks(&tx, tasks)?;
        }
        if let Some(state) = timer_state {
            put_setting(&tx, TIMER_STATE_KEY, state)?;
        }
        if let Some(id) = active_task_id {
            put_setting(&tx, ACTIVE_TASK_KEY, &Value::String(id.to_string()))?;
        }
        if let Some(extended) = extended_sessions {
            put_setting(&tx, "isLongPomodoro", &Value::Bool(extended))?;
        }
        put_setting(&tx, MIGRATION_COMPLETE_KEY, &Value::Bool(true))?;
        tx.commit()?;
        Ok(())
    }

    /// Empties all three collections, leaving the schema intact.
    pub fn clear_all(&mut self) -> Result<(), CoreError> {
        let tx = self.conn_mut()?.transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        tx.execute("DELETE FROM sessions", [])?;
        tx.execute("DELETE FROM settings", [])?;
        tx.commit()?;
        Ok(())
    }
}

fn put_setting(tx: &Transaction, key: &str, value: &Value) -> Result<(), CoreError> {
    let raw = serde_json::to_string(value).map_err(|_| CoreError::InvalidFormat("settings value"))?;
    tx.execute("INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)", params![key, raw])?;
    Ok(())
}
