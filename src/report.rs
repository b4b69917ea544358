//! Import log and sample template writers.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::path::Path;
use tracing::info;

use crate::core::budget::REQUIRED_COLUMNS;
use crate::import::ImportReport;

const LOG_HEADER: [&str; 7] = [
    "timestamp",
    "batch",
    "status",
    "result",
    "execution_error",
    "message",
    "grid_errors",
];

/// Writes the per-batch import log as a `;`-separated CSV.
pub fn write_log<P: AsRef<Path>>(report: &ImportReport, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    writer.write_record(LOG_HEADER)?;
    for record in &report.records {
        let batch = record.batch.to_string();
        let grid_errors = record.outcome.grid_errors.join(" | ");
        writer.write_record([
            record.timestamp.as_str(),
            batch.as_str(),
            record.status.as_str(),
            record.outcome.result.as_deref().unwrap_or(""),
            record.outcome.execution_error.as_deref().unwrap_or(""),
            record.outcome.message.as_deref().unwrap_or(""),
            grid_errors.as_str(),
        ])?;
    }
    writer.flush()?;

    info!("Wrote import log to {}", path.display());
    Ok(())
}

/// Writes a template spreadsheet that passes validation as-is.
pub fn write_sample<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("Failed to create sample file: {}", path.display()))?;

    writer.write_record(REQUIRED_COLUMNS)?;
    writer.write_record(["101", "07/2025", "1", "1002", "1002", "15000.00", "0.00"])?;
    writer.write_record(["101", "08/2025", "1", "1002", "1002", "20000.00", "0.00"])?;
    writer.flush()?;

    info!("Wrote sample spreadsheet to {}", path.display());
    Ok(())
}
