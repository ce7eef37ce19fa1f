//! Display implementation for dorofy application messages.
//!
//! Converts structured `Message` variants into the human-readable text shown
//! in the terminal. Keeping every user-facing string in one place makes the
//! wording consistent and keeps format parameters type-checked.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskAdded(title) => format!("Task '{}' added", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted => "Task deleted".to_string(),
            Message::TaskNotFound(id) => format!("No task with id '{}'", id),
            Message::TaskCompleted(title) => format!("Task '{}' marked as completed", title),
            Message::TaskReopened(title) => format!("Task '{}' reopened", title),
            Message::TaskAutoCompleted(title) => format!("Task '{}' reached its estimate and was completed", title),
            Message::TaskSetActive(title) => format!("Task '{}' is now active", title),
            Message::TaskActiveCleared => "Active task cleared".to_string(),
            Message::NoActiveTask => "No active task".to_string(),
            Message::NoTasksYet => "No tasks yet. Add one with 'dorofy task add'".to_string(),
            Message::CompletedTasksCleared(count) => {
                format!("Cleared {} completed {}", count, if *count == 1 { "task" } else { "tasks" })
            }
            Message::NoCompletedTasksToClear => "No completed tasks to clear".to_string(),
            Message::TaskSaveFailed(e) => format!("Failed to save tasks: {}", e),

            // === TIMER MESSAGES ===
            Message::TimerStarted(mode) => format!("Timer started: {}", mode),
            Message::TimerReset => "Timer reset".to_string(),
            Message::TimerModeSwitched(mode) => format!("Switched to {}", mode),
            Message::FocusComplete => "Focus session completed!".to_string(),
            Message::LongBreakStarting => "Great job! Time for a long break.".to_string(),
            Message::ShortBreakStarting => "Focus session completed! Take a short break.".to_string(),
            Message::BreakOver => "Break finished. Ready for your next focus session?".to_string(),
            Message::LongBreakOver => "Long break finished. Ready to get back to work?".to_string(),
            Message::ExtendedSessionsOn => "Extended sessions enabled (50/10/25 minutes)".to_string(),
            Message::ExtendedSessionsOff => "Extended sessions disabled (25/5/15 minutes)".to_string(),
            Message::TimerStateSaveFailed(e) => format!("Failed to save timer state: {}", e),

            // === SESSION HISTORY MESSAGES ===
            Message::NoSessionsRecorded => "No focus sessions recorded yet".to_string(),
            Message::SessionRecorded(duration) => format!("Recorded a {} focus session", duration),
            Message::SessionSaveFailed(e) => format!("Failed to save session record: {}", e),

            // === STORAGE MESSAGES ===
            Message::SettingSaveFailed(key, e) => format!("Failed to save setting '{}': {}", key, e),

            // === BACKUP MESSAGES ===
            Message::BackupExported(path) => format!("Backup exported to {}", path),
            Message::BackupImported(tasks, sessions) => {
                format!("Backup imported: {} tasks, {} sessions", tasks, sessions)
            }
            Message::BackupInvalid(reason) => format!("Backup file rejected: {}", reason),
            Message::ConfirmImportReplaceAll => "Importing replaces ALL existing data. Continue?".to_string(),
            Message::ConfirmWipeAll => "This removes ALL tasks, history and settings. Continue?".to_string(),
            Message::AllDataCleared => "All data cleared".to_string(),
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationAlreadyComplete => "Legacy data already migrated".to_string(),
            Message::MigrationPending => "Legacy data present, migration pending".to_string(),
            Message::MigrationNothingToDo => "No legacy data found, nothing to migrate".to_string(),
            Message::MigrationCompleted => "Legacy data migrated successfully".to_string(),
            Message::MigrationFailed(e) => format!("Migration failed, legacy data left in place: {}", e),

            // === EXPORT MESSAGES ===
            Message::ExportingHistory(format) => format!("Exporting session history as {}", format),
            Message::HistoryExported(path) => format!("Session history exported to {}", path),

            // === GENERAL MESSAGES ===
            Message::InitComplete => "dorofy is ready".to_string(),
        };

        write!(f, "{}", text)
    }
}
