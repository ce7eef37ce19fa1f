use super::store::Store;
use crate::libs::error::CoreError;
use crate::libs::task::Task;
use rusqlite::{params, Row, Transaction};

const SELECT_TASKS: &str =
    "SELECT id, title, completed, estimated_units, completed_units, created_at, completed_at FROM tasks ORDER BY position";
const INSERT_TASK: &str = "INSERT INTO tasks (id, title, completed, estimated_units, completed_units, created_at, completed_at, position)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

/// Task lists are small and rewritten wholesale on every mutation, so the
/// store offers only a full replace and a full read. Position reflects the
/// caller's ordering (newest-first by default, arbitrary after reorder).
impl Store {
    /// Atomically clears and rewrites the entire task collection.
    pub fn replace_tasks(&mut self, tasks: &[Task]) -> Result<(), CoreError> {
        let tx = self.conn_mut()?.transaction()?;
        write_tasks(&tx, tasks)?;
        tx.commit()?;
        Ok(())
    }

    /// Returns all tasks in their persisted order.
    pub fn get_tasks(&self) -> Result<Vec<Task>, CoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(SELECT_TASKS)?;
        let tasks = stmt.query_map([], task_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }
}

pub(crate) fn write_tasks(tx: &Transaction, tasks: &[Task]) -> Result<(), CoreError> {
    tx.execute("DELETE FROM tasks", [])?;
    for (position, task) in tasks.iter().enumerate() {
        tx.execute(
            INSERT_TASK,
            params![
                task.id,
                task.title,
                task.completed,
                task.estimated_units,
                task.completed_units,
                task.created_at,
                task.completed_at,
                position as i64
            ],
        )?;
    }
    Ok(())
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        completed: row.get(2)?,
        estimated_units: row.get(3)?,
        completed_units: row.get(4)?,
        created_at: row.get(5)?,
        completed_at: row.get(6)?,
    })
}
