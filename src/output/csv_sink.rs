//! CSV record sink
//!
//! Records share the field order of the configuration, so the header is
//! simply the union of field names across all records in first-seen order.
//! An absent value becomes an empty cell.

use crate::extract::Record;
use crate::output::traits::{OutputResult, RecordSink};
use std::io::Write;

/// Writes records as CSV with a header row
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    /// Creates a sink writing CSV to `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    /// Writes the header row followed by one row per record
    ///
    /// An empty record set produces no output at all, not even a header.
    fn write_records(&mut self, records: &[Record]) -> OutputResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut columns: Vec<&str> = Vec::new();
        for record in records {
            for name in record.field_names() {
                if !columns.contains(&name) {
                    columns.push(name);
                }
            }
        }

        self.writer.write_record(&columns)?;

        for record in records {
            let row: Vec<&str> = columns
                .iter()
                .map(|column| record.get(column).unwrap_or(""))
                .collect();
            self.writer.write_record(&row)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
