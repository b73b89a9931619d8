//! Page outcome definitions for run accounting
//!
//! Every page the paginator yields ends in exactly one of these outcomes;
//! the run summary is computed from them.

use crate::{FetchError, ParseError};
use std::fmt;

/// How a single page attempt ended
#[derive(Debug)]
pub enum PageStatus {
    /// Page was fetched, parsed, and yielded a record
    Succeeded,

    /// robots.txt disallowed the page; no request was made
    SkippedByRobots,

    /// Fetch or parse failed; the page yielded no record
    Failed(PageFailure),
}

/// What went wrong on a failed page
#[derive(Debug)]
pub enum PageFailure {
    Fetch(FetchError),
    Parse(ParseError),
}

impl PageStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Robots skips are reported apart from failures
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::SkippedByRobots)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Short label for logs and the printed summary
    pub fn label(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::SkippedByRobots => "skipped-by-robots",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(failure) => write!(f, "failed: {}", failure),
            other => write!(f, "{}", other.label()),
        }
    }
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "{}", e),
            Self::Parse(e) => write!(f, "{}", e),
        }
    }
}

/// The recorded outcome for one attempted page
#[derive(Debug)]
pub struct PageOutcome {
    url: String,
    status: PageStatus,
}

impl PageOutcome {
    pub fn new(url: impl Into<String>, status: PageStatus) -> Self {
        PageOutcome {
            url: url.into(),
            status,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }
}
