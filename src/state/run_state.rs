//! Run state: collected records and per-page outcomes
//!
//! `RunState` is owned exclusively by the run loop while pages are being
//! visited; the output sinks receive it read-only once the loop ends.

use crate::extract::Record;
use crate::state::outcome::{PageFailure, PageOutcome, PageStatus};
use chrono::{DateTime, Utc};

/// Everything one run accumulates: records in page order plus one outcome
/// per attempted page
///
/// A record can only enter through [`RunState::record_success`], which also
/// records the page outcome, so the record count always equals the
/// succeeded page count.
#[derive(Debug)]
pub struct RunState {
    records: Vec<Record>,
    outcomes: Vec<PageOutcome>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl RunState {
    pub fn new() -> Self {
        RunState {
            records: Vec::new(),
            outcomes: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Records a page that was fetched and parsed, with its extracted record
    pub fn record_success(&mut self, url: &str, record: Record) {
        self.records.push(record);
        self.outcomes
            .push(PageOutcome::new(url, PageStatus::Succeeded));
    }

    /// Records a page that robots.txt ruled out before any request
    pub fn record_robots_skip(&mut self, url: &str) {
        self.outcomes
            .push(PageOutcome::new(url, PageStatus::SkippedByRobots));
    }

    /// Records a page whose fetch or parse failed
    pub fn record_failure(&mut self, url: &str, failure: PageFailure) {
        self.outcomes
            .push(PageOutcome::new(url, PageStatus::Failed(failure)));
    }

    /// Marks the run as finished, fixing the end timestamp
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Collected records, in the order their pages were visited
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// One outcome per attempted page, in visit order
    pub fn outcomes(&self) -> &[PageOutcome] {
        &self.outcomes
    }

    /// Number of pages attempted so far
    pub fn pages_attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Computes the summary counts for this run
    pub fn summary(&self) -> RunSummary {
        let succeeded = self
            .outcomes
            .iter()
            .filter(|o| o.status().is_success())
            .count();
        let skipped_by_robots = self
            .outcomes
            .iter()
            .filter(|o| o.status().is_skipped())
            .count();
        let failed = self
            .outcomes
            .iter()
            .filter(|o| o.status().is_failure())
            .count();

        RunSummary {
            pages_attempted: self.outcomes.len(),
            succeeded,
            skipped_by_robots,
            failed,
            records: self.records.len(),
            started_at: self.started_at,
            finished_at: self.finished_at.unwrap_or_else(Utc::now),
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState::new()
    }
}

/// Counts and timing for a finished run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub pages_attempted: usize,
    pub succeeded: usize,
    pub skipped_by_robots: usize,
    pub failed: usize,
    pub records: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Wall-clock duration of the run
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Percentage of attempted pages that succeeded
    pub fn success_rate(&self) -> f64 {
        if self.pages_attempted == 0 {
            return 0.0;
        }
        (self.succeeded as f64 / self.pages_attempted as f64) * 100.0
    }
}
