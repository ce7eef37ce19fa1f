//! # Dorofy - focus timer with task tracking
//!
//! A command-line pomodoro timer that tracks tasks, records completed
//! focus sessions, and keeps everything in a local embedded database.
//!
//! ## Features
//!
//! - **Focus Timer**: 25/5/15-minute focus/break cycles with a long break
//!   every fourth cycle, and an extended 50/10/25 profile
//! - **Task Tracking**: Estimates in focus intervals, automatic completion
//!   when a task reaches its estimate, active-task selection
//! - **Session History**: Append-only log of completed focus intervals
//! - **Durable Storage**: Embedded SQLite store with full backup
//!   export/import and a migration path from the legacy flat file format
//! - **Desktop Notifications**: Interval-completion notifications
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dorofy::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
