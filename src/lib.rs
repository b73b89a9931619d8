//! Pagesift: a polite, selector-driven page scraper
//!
//! This crate walks a paginated listing, extracts configured fields from each
//! page with CSS selectors, and collects the results as flat records for CSV
//! or JSON output. Requests are rate limited and gated on robots.txt.

pub mod config;
pub mod extract;
pub mod output;
pub mod robots;
pub mod scrape;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for pagesift operations.
///
/// Everything here is fatal to the run; per-page trouble is modelled by
/// [`FetchError`] and [`ParseError`] and recorded as a page outcome instead.
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Base URL {url} unreachable on first request: {source}")]
    BaseUnreachable { url: String, source: FetchError },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector for '{field}': {message}")]
    InvalidSelector { field: String, message: String },

    #[error("Invalid pattern for '{field}': {message}")]
    InvalidPattern { field: String, message: String },
}

/// Per-page fetch failures. Recorded against the page, not fatal to the run,
/// except for a connection-class failure on the very first page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),
}

impl FetchError {
    /// True for failures that mean the host itself could not be reached.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, FetchError::Timeout | FetchError::Connection(_))
    }
}

/// Per-page parse failures. A page that parses but matches nothing is not an
/// error; these fire only when the body is not usable markup at all.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Expected HTML, got content type '{content_type}'")]
    NotHtml { content_type: String },

    #[error("Response body is empty")]
    EmptyDocument,
}

/// Result type alias for pagesift operations
pub type Result<T> = std::result::Result<T, SiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::Record;
pub use state::{PageOutcome, PageStatus, RunState, RunSummary};
