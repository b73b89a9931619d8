//! Field extraction module for pagesift
//!
//! This module turns fetched page bodies into flat records:
//! - [`parse_page`] checks the content type and parses the body into a
//!   document
//! - [`ExtractRule`] is one compiled `selector@attr` rule
//! - [`Schema`] applies the configured rules in order, producing a
//!   [`Record`] per page
//!
//! A page that parses but matches none of the rules still yields a record;
//! absence is data, not an error.

mod record;
mod rule;
mod schema;

pub use record::Record;
pub use rule::{ExtractRule, RuleError};
pub use schema::Schema;

use crate::ParseError;
use scraper::Html;

/// Parses a fetched body into a document
///
/// A missing content type is treated as HTML, since small fixture servers
/// often omit the header. Parsing itself is lenient (html5ever recovers
/// from malformed markup), so the only failures are a declared non-HTML
/// content type and an empty body.
///
/// # Arguments
///
/// * `body` - The response body
/// * `content_type` - The response's Content-Type header value, if any
pub fn parse_page(body: &str, content_type: Option<&str>) -> Result<Html, ParseError> {
    if let Some(ct) = content_type {
        if !is_html_content_type(ct) {
            return Err(ParseError::NotHtml {
                content_type: ct.to_string(),
            });
        }
    }

    if body.trim().is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    Ok(Html::parse_document(body))
}

fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("html")
}
