//! Scrape run orchestration
//!
//! This module drives a whole run: it walks the page sequence handed out by
//! the paginator and, for each page, checks robots.txt, waits out the rate
//! limit, fetches, parses and extracts a record. Per-page failures are
//! recorded and the run carries on; only an unreachable first page aborts,
//! since that usually means the target was misconfigured.

use crate::config::Config;
use crate::extract::{parse_page, ExtractRule, Schema};
use crate::robots::RobotsGate;
use crate::scrape::fetcher::{build_http_client, fetch_page};
use crate::scrape::limiter::RateLimiter;
use crate::scrape::paginator::Paginator;
use crate::state::{PageFailure, RunState};
use crate::{ConfigError, SiftError};
use reqwest::Client;
use url::Url;

/// Drives one scrape run from first page to summary
#[derive(Debug)]
pub struct Runner {
    client: Client,
    schema: Schema,
    paginator: Paginator,
    limiter: RateLimiter,
    robots: RobotsGate,
    state: RunState,
    base: Url,
}

impl Runner {
    /// Creates a runner from a validated configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The scrape configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Runner)` - Ready to run
    /// * `Err(SiftError)` - The configuration could not be compiled or the
    ///   HTTP client could not be built
    pub fn new(config: &Config) -> crate::Result<Self> {
        let base = Url::parse(&config.target.base_url).map_err(|e| {
            SiftError::Config(ConfigError::InvalidUrl(format!(
                "{}: {}",
                config.target.base_url, e
            )))
        })?;

        let next_rule = match &config.target.next_page {
            Some(selector) => Some(ExtractRule::parse(selector).map_err(|e| {
                SiftError::Config(ConfigError::InvalidSelector {
                    field: "next-page".to_string(),
                    message: e.to_string(),
                })
            })?),
            None => None,
        };

        let schema = Schema::compile(&config.fields).map_err(SiftError::Config)?;
        let client = build_http_client(&config.request)?;

        Ok(Self {
            client,
            schema,
            paginator: Paginator::new(
                base.clone(),
                next_rule,
                config.target.max_pages,
                config.target.same_host_only,
            ),
            limiter: RateLimiter::new(config.request.delay()),
            robots: RobotsGate::new(
                config.target.respect_robots,
                config.request.user_agent.clone(),
            ),
            state: RunState::new(),
            base,
        })
    }

    /// Runs the scrape to completion
    ///
    /// The loop:
    /// 1. Take the next URL from the paginator
    /// 2. Ask the robots gate whether it may be fetched
    /// 3. Wait out the rate limit, then fetch
    /// 4. Parse the page, extract one record, feed the paginator
    /// 5. Record the outcome and continue
    ///
    /// # Returns
    ///
    /// * `Ok(RunState)` - The completed run, including pages that failed
    /// * `Err(SiftError)` - The first page was unreachable
    pub async fn run(mut self) -> crate::Result<RunState> {
        tracing::info!("Starting scrape of {}", self.base);

        while let Some(url) = self.paginator.next_page() {
            self.process_page(url).await?;
        }

        self.state.finish();

        let summary = self.state.summary();
        tracing::info!(
            "Scrape finished: {} pages attempted, {} succeeded, {} skipped, {} failed",
            summary.pages_attempted,
            summary.succeeded,
            summary.skipped_by_robots,
            summary.failed
        );

        Ok(self.state)
    }

    /// Processes a single page of the run
    async fn process_page(&mut self, url: Url) -> crate::Result<()> {
        let first_page = self.state.pages_attempted() == 0;
        tracing::debug!("Processing page: {}", url);

        if !self.robots.allows(&self.client, &url).await {
            tracing::info!("Skipping {} (disallowed by robots.txt)", url);
            self.state.record_robots_skip(url.as_str());
            return Ok(());
        }

        if let Some(crawl_delay) = self.robots.crawl_delay(&url) {
            self.limiter.raise_delay_floor(crawl_delay);
        }

        self.limiter.wait_until_ready().await;
        self.limiter.record_fetch();

        let page = match fetch_page(&self.client, url.clone()).await {
            Ok(page) => page,
            Err(e) => {
                if first_page && e.is_unreachable() {
                    return Err(SiftError::BaseUnreachable {
                        url: url.to_string(),
                        source: e,
                    });
                }
                tracing::warn!("Failed to fetch {}: {}", url, e);
                self.state.record_failure(url.as_str(), PageFailure::Fetch(e));
                return Ok(());
            }
        };

        let doc = match parse_page(&page.body, page.content_type.as_deref()) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", page.url, e);
                self.state
                    .record_failure(page.url.as_str(), PageFailure::Parse(e));
                return Ok(());
            }
        };

        let record = self.schema.extract(&doc);
        tracing::info!(
            "Scraped {}: {} of {} fields matched",
            page.url,
            record.matched_count(),
            record.len()
        );

        self.paginator.feed(&page.url, &doc);
        self.state.record_success(page.url.as_str(), record);

        Ok(())
    }
}
