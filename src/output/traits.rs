//! Record sink trait and output error types
//!
//! This module defines the trait interface for record sinks and the error
//! type shared by all output operations.

use crate::extract::Record;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for record sinks
///
/// A sink receives the full set of records collected by a run and writes
/// them out in its format. Sinks see every record at once so formats that
/// need a global view, like CSV headers, can compute it.
pub trait RecordSink {
    /// Writes all records of a run
    ///
    /// # Arguments
    ///
    /// * `records` - The records in the order they were extracted
    fn write_records(&mut self, records: &[Record]) -> OutputResult<()>;
}
