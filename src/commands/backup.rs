//! Backup commands: full export, destructive import, and full wipe.
//!
//! Import and wipe replace or remove everything, so both ask for
//! confirmation unless `--yes` is passed.

use super::open_store;
use crate::libs::messages::Message;
use crate::{msg_error, msg_info, msg_success};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum BackupCommand {
    #[command(about = "Export all data to a JSON backup file")]
    Export(ExportArgs),
    #[command(about = "Import a backup file, replacing ALL existing data")]
    Import(ImportArgs),
    #[command(about = "Remove all tasks, history and settings")]
    Wipe(WipeArgs),
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Custom output file path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Backup file to import
    file: PathBuf,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

#[derive(Debug, Args)]
pub struct WipeArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(command: BackupCommand) -> Result<()> {
    match command {
        BackupCommand::Export(args) => export(args),
        BackupCommand::Import(args) => import(args),
        BackupCommand::Wipe(args) => wipe(args),
    }
}

fn export(args: ExportArgs) -> Result<()> {
    let store = open_store()?;
    let snapshot = store.borrow().export_snapshot()?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("dorofy_backup_{}.json", Local::now().format("%Y%m%d_%H%M%S"))));
    fs::write(&output, serde_json::to_string_pretty(&snapshot)?)?;

    msg_success!(Message::BackupExported(output.display().to_string()));
    Ok(())
}

fn import(args: ImportArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.file)?;
    let snapshot: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            msg_error!(Message::BackupInvalid(e.to_string()));
            return Ok(());
        }
    };

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmImportReplaceAll.to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let store = open_store()?;
    let result = store.borrow_mut().import_snapshot(&snapshot);
    match result {
        Ok((tasks, sessions)) => msg_success!(Message::BackupImported(tasks, sessions)),
        Err(e) => msg_error!(Message::BackupInvalid(e.to_string())),
    }
    Ok(())
}

fn wipe(args: WipeArgs) -> Result<()> {
    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmWipeAll.to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let store = open_store()?;
    store.borrow_mut().clear_all()?;
    msg_success!(Message::AllDataCleared);
    Ok(())
}
