//! Core library modules for the dorofy application.
//!
//! Contains the domain models (tasks, session records, timer state), the
//! repositories and timer engine built on the database layer, the legacy
//! storage migration adapter, and ambient infrastructure: messaging,
//! notifications, data export, and console rendering.

pub mod data_storage;
pub mod error;
pub mod export;
pub mod history;
pub mod messages;
pub mod migrate;
pub mod notify;
pub mod session;
pub mod task;
pub mod tasks;
pub mod timer;
pub mod view;
