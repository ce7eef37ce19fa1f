use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single work item. `completed` and `completed_at` always change
/// together; use [`Task::set_completed`] rather than touching the fields
/// directly so the coupling cannot drift between call sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    // Aliases accept records written by the legacy storage format.
    #[serde(alias = "estimatedPomodoros")]
    pub estimated_units: u32,
    #[serde(alias = "completedPomodoros")]
    pub completed_units: u32,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl Task {
    pub fn new(title: &str, estimated_units: u32) -> Self {
        Task {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            completed: false,
            estimated_units,
            completed_units: 0,
            created_at: Utc::now().timestamp_millis(),
            completed_at: None,
        }
    }

    /// Flips completion state, keeping `completed_at` in sync. This is the
    /// single place the completed/completed_at pair is allowed to change;
    /// manual toggling and auto-completion both go through it.
    pub fn set_completed(&mut self, completed: bool, now: i64) {
        self.completed = completed;
        self.completed_at = if completed { Some(now) } else { None };
    }

    /// Credits one finished focus interval to this task. When the estimate
    /// is reached and the task was not already completed, it is
    /// auto-completed in the same update. Progress may exceed the estimate.
    /// Returns true when this call auto-completed the task.
    pub fn record_focus_unit(&mut self, now: i64) -> bool {
        self.completed_units += 1;
        if self.completed_units >= self.estimated_units && !self.completed {
            self.set_completed(true, now);
            return true;
        }
        false
    }
}
