use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Upper bound accepted for `delay-seconds`
pub(crate) const MAX_DELAY_SECONDS: f64 = 3600.0;

/// Main configuration structure for pagesift
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub target: TargetConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(rename = "field", default)]
    pub fields: Vec<FieldConfig>,
    pub output: OutputConfig,
}

/// What to scrape and how far to follow it
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// URL of the first page
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Extraction rule for the link to the next page (e.g. ".next-link@href").
    /// Absent means a single-page run.
    #[serde(rename = "next-page")]
    pub next_page: Option<String>,

    /// Upper bound on pages visited in one run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Consult robots.txt before each page fetch
    #[serde(rename = "respect-robots", default = "default_true")]
    pub respect_robots: bool,

    /// Stop pagination when the next link leaves the starting host
    #[serde(rename = "same-host-only", default = "default_true")]
    pub same_host_only: bool,
}

/// HTTP request behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Minimum time between successive page fetches (seconds)
    #[serde(rename = "delay-seconds", default = "default_delay_seconds")]
    pub delay_seconds: f64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-seconds", default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Extra static headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl RequestConfig {
    /// The configured fetch delay as a `Duration`
    ///
    /// Clamped to at most an hour; NaN counts as no delay. Validation
    /// rejects out-of-range values before a file-loaded configuration
    /// gets here.
    pub fn delay(&self) -> Duration {
        if self.delay_seconds.is_nan() {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.delay_seconds.clamp(0.0, MAX_DELAY_SECONDS))
    }

    /// The configured request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        RequestConfig {
            user_agent: default_user_agent(),
            delay_seconds: default_delay_seconds(),
            timeout_seconds: default_timeout_seconds(),
            headers: HashMap::new(),
        }
    }
}

/// One extracted field: a name and the rule that produces its value.
/// Entries keep their file order, which is also the output column order.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    /// Field name in the output record
    pub name: String,

    /// CSS selector, optionally with an `@attribute` suffix
    pub selector: String,

    /// Optional regex applied to the selected value; the first capture
    /// group (or the whole match) becomes the value
    #[serde(default)]
    pub pattern: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Where to write the records. For `format = "both"` this is treated
    /// as a stem and `.csv`/`.json` extensions are appended.
    pub path: String,

    #[serde(default)]
    pub format: OutputFormat,
}

/// Serialization format for collected records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
    Both,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Json
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Both => write!(f, "both"),
        }
    }
}

fn default_max_pages() -> u32 {
    20
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("pagesift/{}", env!("CARGO_PKG_VERSION"))
}

fn default_delay_seconds() -> f64 {
    1.0
}

fn default_timeout_seconds() -> u64 {
    15
}
