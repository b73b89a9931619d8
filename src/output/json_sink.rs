//! JSON record sink
//!
//! Records serialize as a pretty-printed array of objects. Field order
//! inside each object follows the configuration, and absent values are
//! written as `null`.

use crate::extract::Record;
use crate::output::traits::{OutputResult, RecordSink};
use std::io::Write;

/// Writes records as a JSON array
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    /// Creates a sink writing JSON to `writer`
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> RecordSink for JsonSink<W> {
    fn write_records(&mut self, records: &[Record]) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut self.writer, records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, Option<&str>)]) -> Record {
        let mut record = Record::new();
        for (name, value) in fields {
            record.push(*name, value.map(str::to_string));
        }
        record
    }

    fn write_to_string(records: &[Record]) -> String {
        let mut buf = Vec::new();
        JsonSink::new(&mut buf).write_records(records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_records_as_array_of_objects() {
        let records = vec![
            record(&[("name", Some("Widget")), ("price", Some("9.99"))]),
            record(&[("name", Some("Gadget")), ("price", None)]),
        ];

        let out = write_to_string(&records);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed[0]["name"], "Widget");
        assert_eq!(parsed[0]["price"], "9.99");
        assert_eq!(parsed[1]["price"], serde_json::Value::Null);
    }

    #[test]
    fn test_field_order_is_preserved() {
        let records = vec![record(&[
            ("zebra", Some("1")),
            ("apple", Some("2")),
            ("mango", Some("3")),
        ])];

        let out = write_to_string(&records);
        let zebra = out.find("\"zebra\"").unwrap();
        let apple = out.find("\"apple\"").unwrap();
        let mango = out.find("\"mango\"").unwrap();

        assert!(zebra < apple);
        assert!(apple < mango);
    }

    #[test]
    fn test_no_records_writes_empty_array() {
        let out = write_to_string(&[]);
        assert_eq!(out.trim(), "[]");
    }

    #[test]
    fn test_output_ends_with_newline() {
        let out = write_to_string(&[record(&[("name", Some("x"))])]);
        assert!(out.ends_with('\n'));
    }
}
