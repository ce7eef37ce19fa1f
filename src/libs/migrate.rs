//! One-time migration from the legacy flat storage file.
//!
//! Earlier dorofy versions kept everything in a single flat key-value
//! file (`storage.json`): discrete JSON-encoded entries for the task
//! list, timer state, active task id and the extended-session flag. The
//! adapter transfers that data into the durable store exactly once,
//! gated by a persisted completion flag.
//!
//! The transfer is all-or-nothing: every legacy value is parsed before
//! anything is written, the write runs in one store transaction, and the
//! legacy file is removed only after the transaction commits. A failure
//! at any point leaves the legacy file intact so a future attempt can
//! still succeed.

use crate::db::store::Store;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::CoreError;
use crate::libs::messages::Message;
use crate::libs::task::Task;
use crate::msg_error;
use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub const LEGACY_FILE_NAME: &str = "storage.json";
pub const MIGRATION_COMPLETE_KEY: &str = "migrationComplete";

const LEGACY_TASKS_KEY: &str = "tasks";
const LEGACY_TIMER_STATE_KEY: &str = "timerState";
const LEGACY_ACTIVE_TASK_KEY: &str = "activeTaskId";
const LEGACY_EXTENDED_KEY: &str = "isLongPomodoro";

/// The legacy flat store: a string-to-string map where each value is the
/// JSON text the old format kept under that key. Scalar quirks are
/// preserved — the extended flag is the literal string "true"/"false"
/// and the active task id a bare string.
pub struct LegacyStore {
    path: PathBuf,
}

impl LegacyStore {
    pub fn new() -> Result<Self, CoreError> {
        let path = DataStorage::new()
            .get_path(LEGACY_FILE_NAME)
            .map_err(|e| CoreError::StorageUnavailable(e.to_string()))?;
        Ok(LegacyStore { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        LegacyStore { path }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read(&self) -> Result<HashMap<String, String>> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn remove(&self) -> Result<()> {
        fs::remove_file(&self.path)?;
        Ok(())
    }
}

/// Reads the persisted completion flag. False when the store is empty or
/// the flag is absent.
pub fn is_migration_complete(store: &Store) -> bool {
    store
        .get_setting::<bool>(MIGRATION_COMPLETE_KEY)
        .ok()
        .flatten()
        .unwrap_or(false)
}

/// Transfers legacy data into the durable store. Returns `true` iff the
/// migration actually ran; a missing legacy file or one with no known
/// keys is a no-op returning `false`. Safe to call repeatedly — after a
/// successful run the legacy file is gone and the completion flag set,
/// so a second call is a no-op. Any parse or write failure is logged,
/// returns `false`, and leaves the legacy file untouched.
pub fn migrate_from_legacy_store(store: &mut Store, legacy: &LegacyStore) -> bool {
    match try_migrate(store, legacy) {
        Ok(ran) => ran,
        Err(e) => {
            msg_error!(Message::MigrationFailed(e.to_string()));
            false
        }
    }
}

fn try_migrate(store: &mut Store, legacy: &LegacyStore) -> Result<bool> {
    if !legacy.exists() {
        return Ok(false);
    }
    let entries = legacy.read()?;

    let has_legacy_data = [LEGACY_TASKS_KEY, LEGACY_TIMER_STATE_KEY, LEGACY_ACTIVE_TASK_KEY, LEGACY_EXTENDED_KEY]
        .iter()
        .any(|key| entries.contains_key(*key));
    if !has_legacy_data {
        return Ok(false);
    }

    // Parse everything before writing anything.
    let tasks: Option<Vec<Task>> = entries
        .get(LEGACY_TASKS_KEY)
        .map(|raw| serde_json::from_str(raw))
        .transpose()?;
    let timer_state: Option<Value> = entries
        .get(LEGACY_TIMER_STATE_KEY)
        .map(|raw| serde_json::from_str(raw))
        .transpose()?;
    let active_task_id = entries.get(LEGACY_ACTIVE_TASK_KEY).cloned();
    let extended_sessions = entries.get(LEGACY_EXTENDED_KEY).map(|raw| raw == "true");

    store.import_legacy(
        tasks.as_deref(),
        timer_state.as_ref(),
        active_task_id.as_deref(),
        extended_sessions,
    )?;

    legacy.remove()?;
    Ok(true)
}
