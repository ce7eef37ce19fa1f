//! Task repository: domain rules over the task collection.
//!
//! Holds the in-memory projection of the task list (newest first) plus the
//! active-task reference, and is the only writer of both. Every mutation
//! updates memory first and then pushes the whole collection to the store;
//! a failed write is logged and warned about but never rolled back, so the
//! display stays responsive and storage catches up on the next successful
//! save.

use crate::db::store::Store;
use crate::libs::error::CoreError;
use crate::libs::messages::Message;
use crate::libs::task::Task;
use crate::msg_warning;
use chrono::Utc;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Settings key holding the active task id.
pub const ACTIVE_TASK_KEY: &str = "activeTaskId";

/// Partial update applied by [`TaskRepository::update_task`]; unset fields
/// are left unchanged.
#[derive(Debug, Default, Clone)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub estimated_units: Option<u32>,
    pub completed_units: Option<u32>,
}

pub struct TaskRepository {
    store: Rc<RefCell<Store>>,
    tasks: Vec<Task>,
    active_task_id: Option<String>,
}

impl TaskRepository {
    pub fn load(store: Rc<RefCell<Store>>) -> Result<Self, CoreError> {
        let tasks = store.borrow().get_tasks()?;
        let active_task_id = store.borrow().get_setting::<String>(ACTIVE_TASK_KEY)?;
        Ok(TaskRepository { store, tasks, active_task_id })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn active_task_id(&self) -> Option<&str> {
        self.active_task_id.as_deref()
    }

    /// Creates a task at the top of the list. Rejects blank titles without
    /// touching memory or storage. The new task becomes active when no
    /// task currently is.
    pub fn add_task(&mut self, title: &str, estimated_units: u32) -> Result<&Task, CoreError> {
        if title.trim().is_empty() {
            return Err(CoreError::EmptyTitle);
        }
        let task = Task::new(title, estimated_units.max(1));
        let id = task.id.clone();
        self.tasks.insert(0, task);
        self.persist_tasks();
        if self.active_task_id.is_none() {
            self.set_active_task(Some(&id));
        }
        Ok(&self.tasks[0])
    }

    /// Merges fields into the matching task. No-op when the id is unknown.
    pub fn update_task(&mut self, id: &str, update: TaskUpdate) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(estimated) = update.estimated_units {
            task.estimated_units = estimated.max(1);
        }
        if let Some(completed_units) = update.completed_units {
            task.completed_units = completed_units;
        }
        self.persist_tasks();
    }

    /// Removes the task. When it was the active task the reference is
    /// cleared; no other task is auto-selected.
    pub fn delete_task(&mut self, id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return;
        }
        self.persist_tasks();
        if self.active_task_id.as_deref() == Some(id) {
            self.set_active_task(None);
        }
    }

    /// Flips completion state, independent of progress. Returns the new
    /// state, or `None` when the id is unknown.
    pub fn toggle_completion(&mut self, id: &str) -> Option<bool> {
        let now = Utc::now().timestamp_millis();
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        let completed = !task.completed;
        task.set_completed(completed, now);
        self.persist_tasks();
        Some(completed)
    }

    /// Credits one finished focus interval to `id` (defaulting to the
    /// active task). No-op when no task is targeted. Returns `Some(true)`
    /// when this increment auto-completed the task.
    pub fn increment_progress(&mut self, id: Option<&str>) -> Option<bool> {
        let id = id.map(str::to_string).or_else(|| self.active_task_id.clone())?;
        let now = Utc::now().timestamp_millis();
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        let auto_completed = task.record_focus_unit(now);
        self.persist_tasks();
        Some(auto_completed)
    }

    pub fn set_active_task(&mut self, id: Option<&str>) {
        self.active_task_id = id.map(str::to_string);
        let result = match &self.active_task_id {
            Some(id) => self.store.borrow_mut().set_setting(ACTIVE_TASK_KEY, id),
            None => self.store.borrow_mut().remove_setting(ACTIVE_TASK_KEY),
        };
        if let Err(e) = result {
            msg_warning!(Message::SettingSaveFailed(ACTIVE_TASK_KEY.to_string(), e.to_string()));
        }
    }

    pub fn get_active_task(&self) -> Option<&Task> {
        let id = self.active_task_id.as_deref()?;
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Removes all completed tasks, clearing the active reference when it
    /// pointed at one of them. Returns the number removed (zero means
    /// nothing to clear).
    pub fn clear_completed_tasks(&mut self) -> usize {
        let active_was_completed = self.get_active_task().is_some_and(|t| t.completed);
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed == 0 {
            return 0;
        }
        self.persist_tasks();
        if active_was_completed {
            self.set_active_task(None);
        }
        removed
    }

    /// Replaces the stored order wholesale. The new order must contain
    /// exactly the current task set — dropping or duplicating ids is
    /// rejected without any change.
    pub fn reorder_tasks(&mut self, new_order: Vec<Task>) -> Result<(), CoreError> {
        let current: HashSet<&str> = self.tasks.iter().map(|t| t.id.as_str()).collect();
        let incoming: HashSet<&str> = new_order.iter().map(|t| t.id.as_str()).collect();
        if new_order.len() != self.tasks.len() || current != incoming {
            return Err(CoreError::ReorderMismatch);
        }
        self.tasks = new_order;
        self.persist_tasks();
        Ok(())
    }

    fn persist_tasks(&self) {
        if let Err(e) = self.store.borrow_mut().replace_tasks(&self.tasks) {
            msg_warning!(Message::TaskSaveFailed(e.to_string()));
        }
    }
}
