use super::export::format_timestamp;
use super::session::SessionRecord;
use super::task::Task;
use super::timer::{format_time, TimerDurations, TimerState};
use prettytable::{row, Table};
use std::collections::HashMap;

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task], active_task_id: Option<&str>) {
        let mut table = Table::new();

        table.add_row(row!["", "ID", "TITLE", "PROGRESS", "STATUS", "CREATED"]);
        for task in tasks {
            let marker = if active_task_id == Some(task.id.as_str()) { "▶" } else { "" };
            let status = if task.completed { "done" } else { "open" };
            table.add_row(row![
                marker,
                short_id(&task.id),
                task.title,
                format!("{}/{}", task.completed_units, task.estimated_units),
                status,
                format_timestamp(task.created_at)
            ]);
        }
        table.printstd();
    }

    pub fn history(sessions: &[SessionRecord], tasks: &[Task]) {
        let titles: HashMap<&str, &str> = tasks.iter().map(|t| (t.id.as_str(), t.title.as_str())).collect();
        let mut table = Table::new();

        table.add_row(row!["COMPLETED AT", "DURATION", "TASK"]);
        for session in sessions {
            let task = session
                .task_id
                .as_deref()
                .and_then(|id| titles.get(id).copied())
                .unwrap_or("-");
            table.add_row(row![
                format_timestamp(session.completed_at),
                format_time(session.duration_seconds),
                task
            ]);
        }
        table.printstd();
    }

    pub fn timer(state: &TimerState, durations: &TimerDurations) {
        let mut table = Table::new();

        table.add_row(row!["MODE", "TIME LEFT", "RUNNING", "COMPLETED CYCLES"]);
        table.add_row(row![
            state.mode.label(),
            format!("{} / {}", format_time(state.time_left), format_time(durations.duration_of(state.mode))),
            if state.is_running { "yes" } else { "no" },
            state.completed_cycles
        ]);
        table.printstd();
    }
}

/// First id segment, enough to disambiguate on the command line.
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}
