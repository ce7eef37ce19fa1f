pub mod backup;
pub mod history;
pub mod init;
pub mod migrate;
pub mod task;
pub mod timer;

use crate::db::store::Store;
use crate::libs::migrate::{is_migration_complete, migrate_from_legacy_store, LegacyStore};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Initialize local storage and migrate legacy data")]
    Init,
    #[command(subcommand, about = "Manage tasks")]
    Task(task::TaskCommand),
    #[command(about = "Run and control the focus timer")]
    Timer(timer::TimerArgs),
    #[command(about = "Show or export the focus session history")]
    History(history::HistoryArgs),
    #[command(subcommand, about = "Backup, restore or wipe all data")]
    Backup(backup::BackupCommand),
    #[command(about = "Show legacy storage migration status or run it")]
    Migrate(migrate::MigrateArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init => init::cmd(),
            Commands::Task(command) => task::cmd(command),
            Commands::Timer(args) => timer::cmd(args),
            Commands::History(args) => history::cmd(args),
            Commands::Backup(command) => backup::cmd(command),
            Commands::Migrate(args) => migrate::cmd(args),
        }
    }
}

/// Opens the durable store and runs the legacy migration when it has not
/// completed yet, so every command sees migrated data on its first read.
pub(crate) fn open_store() -> Result<Rc<RefCell<Store>>> {
    let mut store = Store::new()?;
    if !is_migration_complete(&store) {
        let legacy = LegacyStore::new()?;
        if legacy.exists() {
            migrate_from_legacy_store(&mut store, &legacy);
        }
    }
    Ok(Rc::new(RefCell::new(store)))
}
