//! Session history commands: list recorded focus intervals or export
//! them for external analysis.

use super::open_store;
use crate::libs::export::{ExportFormat, Exporter};
use crate::libs::history::SessionHistory;
use crate::libs::messages::Message;
use crate::libs::tasks::TaskRepository;
use crate::libs::view::View;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    command: Option<HistoryCommand>,
}

#[derive(Debug, Subcommand)]
enum HistoryCommand {
    #[command(about = "List recorded focus sessions, newest first")]
    List(ListArgs),
    #[command(about = "Export the session history to a file")]
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Show at most this many sessions
    #[arg(short, long)]
    limit: Option<usize>,
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,
    /// Custom output file path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: HistoryArgs) -> Result<()> {
    match args.command.unwrap_or(HistoryCommand::List(ListArgs { limit: None })) {
        HistoryCommand::List(args) => list(args),
        HistoryCommand::Export(args) => export(args),
    }
}

fn list(args: ListArgs) -> Result<()> {
    let store = open_store()?;
    let history = SessionHistory::load(store.clone())?;
    let tasks = TaskRepository::load(store)?;

    if history.history().is_empty() {
        msg_info!(Message::NoSessionsRecorded);
        return Ok(());
    }

    let limit = args.limit.unwrap_or(usize::MAX);
    let shown: Vec<_> = history.history().iter().take(limit).cloned().collect();
    View::history(&shown, tasks.tasks());
    Ok(())
}

fn export(args: ExportArgs) -> Result<()> {
    let store = open_store()?;
    let history = SessionHistory::load(store)?;

    msg_info!(Message::ExportingHistory(format!("{:?}", args.format)));

    let exporter = Exporter::new(args.format, args.output);
    exporter.export(history.history())?;

    msg_success!(Message::HistoryExported(exporter.output_path().display().to_string()));
    Ok(())
}
