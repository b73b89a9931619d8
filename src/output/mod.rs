//! Output module for writing collected records
//!
//! This module handles:
//! - Writing records as CSV or JSON (or both at once)
//! - Printing the end-of-run summary

mod csv_sink;
mod json_sink;
pub mod stats;
mod traits;

pub use csv_sink::CsvSink;
pub use json_sink::JsonSink;
pub use stats::print_run_summary;
pub use traits::{OutputError, OutputResult, RecordSink};

use crate::config::{OutputConfig, OutputFormat};
use crate::extract::Record;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Writes the collected records to the configured destination
///
/// For `format = "both"` the configured path is treated as a stem and one
/// file per format is written next to it.
///
/// # Arguments
///
/// * `config` - The output configuration
/// * `records` - The records in extraction order
///
/// # Returns
///
/// * `Ok(paths)` - The files that were written
/// * `Err(OutputError)` - A file could not be created or written
pub fn write_records(config: &OutputConfig, records: &[Record]) -> OutputResult<Vec<PathBuf>> {
    let path = Path::new(&config.path);
    let mut written = Vec::new();

    match config.format {
        OutputFormat::Csv => {
            write_csv(path, records)?;
            written.push(path.to_path_buf());
        }
        OutputFormat::Json => {
            write_json(path, records)?;
            written.push(path.to_path_buf());
        }
        OutputFormat::Both => {
            let csv_path = path.with_extension("csv");
            let json_path = path.with_extension("json");
            write_csv(&csv_path, records)?;
            write_json(&json_path, records)?;
            written.push(csv_path);
            written.push(json_path);
        }
    }

    for path in &written {
        tracing::info!("Wrote {} records to {}", records.len(), path.display());
    }

    Ok(written)
}

/// Writes records as CSV to `path`
fn write_csv(path: &Path, records: &[Record]) -> OutputResult<()> {
    let file = File::create(path)?;
    CsvSink::new(file).write_records(records)
}

/// Writes records as JSON to `path`
fn write_json(path: &Path, records: &[Record]) -> OutputResult<()> {
    let file = File::create(path)?;
    JsonSink::new(file).write_records(records)
}
