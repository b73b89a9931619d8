//! Scraping module for page fetching and run orchestration
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with error classification
//! - Next-page link discovery and traversal guards
//! - Rate limiting between fetches
//! - Overall run coordination

mod fetcher;
mod limiter;
mod paginator;
mod runner;

pub use fetcher::{build_http_client, fetch_page, PageResult};
pub use limiter::RateLimiter;
pub use paginator::Paginator;
pub use runner::Runner;

use crate::config::Config;
use crate::state::RunState;

/// Runs a complete scrape
///
/// This is the main entry point for a run. It will:
/// 1. Compile the field rules and build the HTTP client
/// 2. Fetch pages one at a time, honoring robots.txt and the rate limit
/// 3. Extract one record per page and follow next-page links
/// 4. Return the collected records and per-page outcomes
///
/// # Arguments
///
/// * `config` - The scrape configuration
///
/// # Returns
///
/// * `Ok(RunState)` - The completed run
/// * `Err(SiftError)` - The configuration could not be compiled or the
///   first page was unreachable
///
/// # Example
///
/// ```no_run
/// use pagesift::config::load_config;
/// use pagesift::scrape;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let state = scrape::run(&config).await?;
/// println!("{} records", state.records().len());
/// # Ok(())
/// # }
/// ```
pub async fn run(config: &Config) -> crate::Result<RunState> {
    let runner = Runner::new(config)?;
    runner.run().await
}
