use serde::ser::{Serialize, SerializeMap, Serializer};

/// One flat record extracted from a single page
///
/// A record maps field names to extracted values; an absent value means the
/// page had no match for that field, which is data rather than an error.
/// Field order follows the configured schema and survives serialization, so
/// JSON keys come out in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Appends a field. Order of insertion is the output order.
    pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
        self.fields.push((name.into(), value));
    }

    /// The value of a named field, if the field exists and matched
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Field names in insertion order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Name/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    /// Number of fields, matched or not
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields that actually matched on the page
    pub fn matched_count(&self) -> usize {
        self.fields.iter().filter(|(_, v)| v.is_some()).count()
    }
}

impl Default for Record {
    fn default() -> Self {
        Record::new()
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        let mut record = Record::new();
        record.push("name", Some("Widget".to_string()));
        record.push("price", Some("9.99".to_string()));
        record.push("rating", None);
        record
    }

    #[test]
    fn test_get() {
        let record = sample();
        assert_eq!(record.get("name"), Some("Widget"));
        assert_eq!(record.get("rating"), None);
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_field_names_in_order() {
        let record = sample();
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["name", "price", "rating"]);
    }

    #[test]
    fn test_matched_count() {
        let record = sample();
        assert_eq!(record.len(), 3);
        assert_eq!(record.matched_count(), 2);
    }

    #[test]
    fn test_json_preserves_order_and_nulls() {
        let record = sample();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"Widget","price":"9.99","rating":null}"#);
    }

    #[test]
    fn test_empty_record_serializes_as_empty_object() {
        let record = Record::new();
        assert!(record.is_empty());
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }
}
