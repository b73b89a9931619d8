use crate::config::FieldConfig;
use crate::extract::record::Record;
use crate::extract::rule::ExtractRule;
use crate::ConfigError;
use scraper::Html;

/// The compiled field schema: every configured field rule, in declaration
/// order
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<(String, ExtractRule)>,
}

impl Schema {
    /// Compiles the configured field rules
    ///
    /// Config validation already checked the rules, so an error here means
    /// the schema was built from an unvalidated source.
    pub fn compile(fields: &[FieldConfig]) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(fields.len());

        for field in fields {
            let mut rule =
                ExtractRule::parse(&field.selector).map_err(|e| ConfigError::InvalidSelector {
                    field: field.name.clone(),
                    message: e.to_string(),
                })?;

            if let Some(pattern) = &field.pattern {
                rule = rule
                    .with_pattern(pattern)
                    .map_err(|e| ConfigError::InvalidPattern {
                        field: field.name.clone(),
                        message: e.to_string(),
                    })?;
            }

            compiled.push((field.name.clone(), rule));
        }

        Ok(Schema { fields: compiled })
    }

    /// Applies every field rule to a document, producing one record
    ///
    /// Fields without a match appear in the record with an absent value;
    /// extraction itself never fails.
    pub fn extract(&self, doc: &Html) -> Record {
        let mut record = Record::new();
        for (name, rule) in &self.fields {
            record.push(name.clone(), rule.apply(doc));
        }
        record
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }
}
