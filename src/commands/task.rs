//! Task management commands.
//!
//! Task ids are UUIDs; commands accept any unique id prefix (the list
//! view prints the first segment, which is almost always enough).

use super::open_store;
use crate::libs::messages::Message;
use crate::libs::tasks::{TaskRepository, TaskUpdate};
use crate::libs::view::View;
use crate::{msg_error, msg_info, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    #[command(about = "Add a new task")]
    Add(AddArgs),
    #[command(about = "List all tasks")]
    List,
    #[command(about = "Toggle a task's completion state")]
    Done(IdArg),
    #[command(about = "Delete a task")]
    Delete(IdArg),
    #[command(about = "Select the active task, or clear the selection")]
    Active(ActiveArgs),
    #[command(about = "Edit a task's title or estimate")]
    Edit(EditArgs),
    #[command(about = "Remove all completed tasks")]
    Clear(ClearArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title
    #[arg(required = true)]
    title: String,
    /// Estimated number of focus intervals to finish the task
    #[arg(short, long, default_value_t = 1)]
    estimate: u32,
}

#[derive(Debug, Args)]
pub struct IdArg {
    /// Task id (any unique prefix)
    id: String,
}

#[derive(Debug, Args)]
pub struct ActiveArgs {
    /// Task id (any unique prefix)
    id: Option<String>,
    /// Clear the active task selection
    #[arg(long, conflicts_with = "id")]
    none: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Task id (any unique prefix)
    id: String,
    /// New title
    #[arg(short, long)]
    title: Option<String>,
    /// New estimate (focus intervals)
    #[arg(short, long)]
    estimate: Option<u32>,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(command: TaskCommand) -> Result<()> {
    let store = open_store()?;
    let mut tasks = TaskRepository::load(store)?;

    match command {
        TaskCommand::Add(args) => {
            match tasks.add_task(&args.title, args.estimate) {
                Ok(task) => msg_success!(Message::TaskAdded(task.title.clone())),
                Err(e) => msg_error!(e),
            }
            Ok(())
        }
        TaskCommand::List => {
            if tasks.tasks().is_empty() {
                msg_info!(Message::NoTasksYet);
            } else {
                View::tasks(tasks.tasks(), tasks.active_task_id());
            }
            Ok(())
        }
        TaskCommand::Done(args) => {
            let Some(id) = resolve_id(&tasks, &args.id) else {
                return Ok(());
            };
            let title = tasks.tasks().iter().find(|t| t.id == id).map(|t| t.title.clone()).unwrap_or_default();
            match tasks.toggle_completion(&id) {
                Some(true) => msg_success!(Message::TaskCompleted(title)),
                Some(false) => msg_info!(Message::TaskReopened(title)),
                None => msg_error!(Message::TaskNotFound(args.id)),
            }
            Ok(())
        }
        TaskCommand::Delete(args) => {
            let Some(id) = resolve_id(&tasks, &args.id) else {
                return Ok(());
            };
            tasks.delete_task(&id);
            msg_info!(Message::TaskDeleted);
            Ok(())
        }
        TaskCommand::Active(args) => {
            if args.none {
                tasks.set_active_task(None);
                msg_info!(Message::TaskActiveCleared);
            } else if let Some(prefix) = args.id {
                let Some(id) = resolve_id(&tasks, &prefix) else {
                    return Ok(());
                };
                tasks.set_active_task(Some(&id));
                let title = tasks.get_active_task().map(|t| t.title.clone()).unwrap_or_default();
                msg_success!(Message::TaskSetActive(title));
            } else {
                match tasks.get_active_task() {
                    Some(task) => msg_info!(Message::TaskSetActive(task.title.clone())),
                    None => msg_info!(Message::NoActiveTask),
                }
            }
            Ok(())
        }
        TaskCommand::Edit(args) => {
            let Some(id) = resolve_id(&tasks, &args.id) else {
                return Ok(());
            };
            tasks.update_task(
                &id,
                TaskUpdate {
                    title: args.title,
                    estimated_units: args.estimate,
                    completed_units: None,
                },
            );
            let title = tasks.tasks().iter().find(|t| t.id == id).map(|t| t.title.clone()).unwrap_or_default();
            msg_success!(Message::TaskUpdated(title));
            Ok(())
        }
        TaskCommand::Clear(args) => {
            let completed = tasks.tasks().iter().filter(|t| t.completed).count();
            if completed == 0 {
                msg_info!(Message::NoCompletedTasksToClear);
                return Ok(());
            }
            if !args.yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("Remove {} completed task(s)?", completed))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    msg_info!(Message::OperationCancelled);
                    return Ok(());
                }
            }
            let removed = tasks.clear_completed_tasks();
            msg_success!(Message::CompletedTasksCleared(removed));
            Ok(())
        }
    }
}

/// Resolves a (possibly partial) id against the task list. Reports an
/// error and returns `None` when the prefix matches nothing or is
/// ambiguous.
fn resolve_id(tasks: &TaskRepository, prefix: &str) -> Option<String> {
    let matches: Vec<&str> = tasks
        .tasks()
        .iter()
        .filter(|t| t.id.starts_with(prefix))
        .map(|t| t.id.as_str())
        .collect();
    match matches.as_slice() {
        [id] => Some((*id).to_string()),
        [] => {
            msg_error!(Message::TaskNotFound(prefix.to_string()));
            None
        }
        _ => {
            msg_error!(Message::TaskNotFound(format!("{} (ambiguous prefix)", prefix)));
            None
        }
    }
}
