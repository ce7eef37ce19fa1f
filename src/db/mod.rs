//! Database layer for the dorofy application.
//!
//! Provides the durable store built on SQLite: the connection lifecycle
//! and settings collection, wholesale task persistence, the append-only
//! session log, and whole-database snapshot export/import.

/// Core store: connection lifecycle, schema, and the settings collection.
pub mod store;

/// Wholesale task collection persistence.
pub mod tasks;

/// Append-only session history persistence.
pub mod sessions;

/// Versioned backup snapshot export/import and full wipe.
pub mod snapshot;
