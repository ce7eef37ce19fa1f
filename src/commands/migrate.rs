//! Legacy storage migration command.
//!
//! Migration also runs automatically before any command's first read;
//! this command exists to inspect the state or trigger it explicitly.

use crate::db::store::Store;
use crate::libs::messages::Message;
use crate::libs::migrate::{is_migration_complete, migrate_from_legacy_store, LegacyStore};
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Only report whether the migration has completed
    #[arg(long)]
    status: bool,
}

pub fn cmd(args: MigrateArgs) -> Result<()> {
    let mut store = Store::new()?;

    if args.status {
        if is_migration_complete(&store) {
            msg_info!(Message::MigrationAlreadyComplete);
        } else if LegacyStore::new()?.exists() {
            msg_info!(Message::MigrationPending);
        } else {
            msg_info!(Message::MigrationNothingToDo);
        }
        return Ok(());
    }

    if is_migration_complete(&store) {
        msg_info!(Message::MigrationAlreadyComplete);
        return Ok(());
    }

    let legacy = LegacyStore::new()?;
    if migrate_from_legacy_store(&mut store, &legacy) {
        msg_success!(Message::MigrationCompleted);
    } else {
        msg_info!(Message::MigrationNothingToDo);
    }
    Ok(())
}
