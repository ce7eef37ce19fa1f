//! Error taxonomy for the dorofy core.
//!
//! Repositories and the timer engine distinguish recoverable validation
//! failures (surfaced synchronously to the caller, no state change) from
//! storage failures (logged, never fatal to the process).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Task title was empty or whitespace-only. No task is created and
    /// nothing is written to storage.
    #[error("Task title cannot be empty")]
    EmptyTitle,

    /// The platform denied access to the data directory or the store has
    /// been closed and not re-initialized.
    #[error("Storage is unavailable: {0}")]
    StorageUnavailable(String),

    /// An underlying database operation failed.
    #[error("Storage operation failed")]
    Storage(#[from] rusqlite::Error),

    /// A record id collided on insert. Should not occur given UUID ids;
    /// surfaced as fatal for the offending operation.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// A backup snapshot is missing a required top-level field. Checked
    /// before any mutation, so rejection has zero side effects.
    #[error("Invalid backup format: missing field `{0}`")]
    InvalidFormat(&'static str),

    /// A reorder request dropped or duplicated task ids.
    #[error("Reorder must preserve the full task set")]
    ReorderMismatch,
}
