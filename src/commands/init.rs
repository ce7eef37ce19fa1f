//! Storage initialization command.
//!
//! Opens (creating if needed) the durable store and transfers data from
//! the legacy flat storage file when one is present. Running it is
//! optional — every command initializes lazily — but it gives a clear
//! first-run confirmation.

use crate::db::store::Store;
use crate::libs::messages::Message;
use crate::libs::migrate::{is_migration_complete, migrate_from_legacy_store, LegacyStore};
use crate::{msg_info, msg_success};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let mut store = Store::new()?;

    if is_migration_complete(&store) {
        msg_info!(Message::MigrationAlreadyComplete);
    } else {
        let legacy = LegacyStore::new()?;
        if migrate_from_legacy_store(&mut store, &legacy) {
            msg_success!(Message::MigrationCompleted);
        } else {
            msg_info!(Message::MigrationNothingToDo);
        }
    }

    msg_success!(Message::InitComplete);
    Ok(())
}
