use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;

/// Errors produced while compiling an extraction rule
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("selector is empty")]
    EmptySelector,

    #[error("invalid CSS selector '{selector}': {message}")]
    Css { selector: String, message: String },

    #[error("invalid regex '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

/// A compiled extraction rule: CSS selector, optional attribute, optional
/// regex refinement
///
/// Rule strings are CSS selectors, optionally followed by `@attribute` to
/// take an attribute value instead of the element's text content:
///
/// - `.item-price` - text of the first `.item-price` element
/// - `.next-link@href` - `href` attribute of the first `.next-link` element
/// - `img.cover@src` - `src` attribute of the first matching image
///
/// The `@` suffix is only split off when what follows it looks like an
/// attribute name, so selectors carrying `@` inside quoted attribute values
/// (e.g. `a[href^="mailto:team@example.test"]`) stay intact.
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use pagesift::extract::ExtractRule;
///
/// let doc = Html::parse_document(r#"<p class="item-price"> 9.99 USD </p>"#);
/// let rule = ExtractRule::parse(".item-price").unwrap();
/// assert_eq!(rule.apply(&doc), Some("9.99 USD".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct ExtractRule {
    raw: String,
    selector: Selector,
    attr: Option<String>,
    pattern: Option<Regex>,
}

impl ExtractRule {
    /// Compiles a rule string
    pub fn parse(input: &str) -> Result<Self, RuleError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RuleError::EmptySelector);
        }

        let (css, attr) = split_attr(input);
        let selector = Selector::parse(css).map_err(|e| RuleError::Css {
            selector: css.to_string(),
            message: e.to_string(),
        })?;

        Ok(ExtractRule {
            raw: input.to_string(),
            selector,
            attr: attr.map(str::to_string),
            pattern: None,
        })
    }

    /// Adds a regex refinement: the first capture group (or the whole match
    /// when the pattern has no groups) becomes the extracted value. A value
    /// the pattern does not match counts as absent.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, RuleError> {
        let re = Regex::new(pattern).map_err(|e| RuleError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.pattern = Some(re);
        Ok(self)
    }

    /// Falls back to the given attribute when the rule names none.
    /// Link rules default to `href` this way.
    pub fn or_attr(mut self, attr: &str) -> Self {
        if self.attr.is_none() {
            self.attr = Some(attr.to_string());
        }
        self
    }

    /// Applies the rule to a parsed document
    ///
    /// The first matching element wins. Extracted values are
    /// whitespace-trimmed; missing attributes and whitespace-only text both
    /// count as absent.
    pub fn apply(&self, doc: &Html) -> Option<String> {
        let element = doc.select(&self.selector).next()?;

        let value = match &self.attr {
            Some(attr) => element.value().attr(attr)?.to_string(),
            None => element.text().collect::<String>(),
        };

        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        match &self.pattern {
            Some(re) => {
                let caps = re.captures(value)?;
                let matched = caps.get(1).or_else(|| caps.get(0))?;
                let refined = matched.as_str().trim();
                if refined.is_empty() {
                    None
                } else {
                    Some(refined.to_string())
                }
            }
            None => Some(value.to_string()),
        }
    }

    /// The rule string as written in the configuration
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Splits a trailing `@attribute` suffix off a rule string
fn split_attr(input: &str) -> (&str, Option<&str>) {
    if let Some((css, attr)) = input.rsplit_once('@') {
        let css = css.trim_end();
        if !css.is_empty() && is_attr_name(attr) {
            return (css, Some(attr));
        }
    }
    (input, None)
}

fn is_attr_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
}
