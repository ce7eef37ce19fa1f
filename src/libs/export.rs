//! Session history export for external analysis.
//!
//! Supports CSV for spreadsheet tools and JSON for programmatic
//! processing. Exports read the history as-is; the backup system in
//! `db::snapshot` is the path for full data round-trips.

use crate::libs::session::SessionRecord;
use anyhow::Result;
use chrono::{Local, TimeZone};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values for spreadsheet applications
    Csv,
    /// Pretty-printed JSON for programmatic processing
    Json,
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter writing to `output_path`, or to a generated
    /// `dorofy_history_<timestamp>.<ext>` file in the working directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        let output_path = output_path.unwrap_or_else(|| {
            PathBuf::from(format!("dorofy_history_{}.{}", Local::now().format("%Y%m%d_%H%M%S"), extension))
        });

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    pub fn export(&self, sessions: &[SessionRecord]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_csv(sessions),
            ExportFormat::Json => self.export_json(sessions),
        }
    }

    fn export_csv(&self, sessions: &[SessionRecord]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.output_path)?;
        writer.write_record(["id", "completed_at", "duration_seconds", "task_id"])?;
        for session in sessions {
            writer.write_record([
                session.id.as_str(),
                &format_timestamp(session.completed_at),
                &session.duration_seconds.to_string(),
                session.task_id.as_deref().unwrap_or(""),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn export_json(&self, sessions: &[SessionRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(sessions)?;
        fs::write(&self.output_path, json)?;
        Ok(())
    }
}

pub(crate) fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}
