//! Next-page link discovery and traversal guards
//!
//! The paginator owns the page sequence of a run. It hands out the next URL
//! to fetch, and after each page is parsed it is fed the document so it can
//! look for the next-page link. Traversal ends when the link is missing,
//! when the page cap is reached, when a link would revisit a page, or when
//! a link would leave the target host.

use crate::extract::ExtractRule;
use crate::url::{resolve_href, same_host};
use scraper::Html;
use std::collections::HashSet;
use url::Url;

/// Walks the chain of next-page links starting from the base URL
#[derive(Debug)]
pub struct Paginator {
    /// Rule that locates the next-page link, if pagination is configured
    rule: Option<ExtractRule>,

    /// Hard cap on pages handed out
    max_pages: u32,

    /// Whether links leaving the base URL's host end the traversal
    same_host_only: bool,

    /// Host reference for the same-host guard
    base: Url,

    /// Every URL handed out or reached via redirect, for cycle detection
    visited: HashSet<String>,

    /// The next URL to hand out, if any
    pending: Option<Url>,

    /// Number of URLs handed out so far
    yielded: u32,
}

impl Paginator {
    /// Creates a paginator rooted at `base`
    ///
    /// A rule without an explicit attribute reads the link's `href`.
    ///
    /// # Arguments
    ///
    /// * `base` - The first page of the run
    /// * `rule` - The next-page rule, or None for a single-page run
    /// * `max_pages` - Hard cap on pages, including the first
    /// * `same_host_only` - Whether to stop at links leaving the base host
    pub fn new(base: Url, rule: Option<ExtractRule>, max_pages: u32, same_host_only: bool) -> Self {
        Self {
            rule: rule.map(|r| r.or_attr("href")),
            max_pages,
            same_host_only,
            pending: Some(base.clone()),
            base,
            visited: HashSet::new(),
            yielded: 0,
        }
    }

    /// Hands out the next URL to fetch
    ///
    /// Returns None once the page cap is reached or no further page was
    /// discovered by [`feed`](Self::feed).
    pub fn next_page(&mut self) -> Option<Url> {
        if self.yielded >= self.max_pages {
            if self.pending.is_some() {
                tracing::info!("Reached max-pages cap of {}, stopping", self.max_pages);
            }
            return None;
        }

        let url = self.pending.take()?;
        self.visited.insert(url.as_str().to_string());
        self.yielded += 1;
        Some(url)
    }

    /// Inspects a fetched page for the next-page link
    ///
    /// `final_url` is the URL the page was actually served from, after
    /// redirects, and is what relative links resolve against. When no
    /// acceptable link is found the traversal is done.
    pub fn feed(&mut self, final_url: &Url, doc: &Html) {
        // A redirect target counts as visited too
        self.visited.insert(final_url.as_str().to_string());

        let Some(rule) = &self.rule else {
            return;
        };

        let Some(href) = rule.apply(doc) else {
            tracing::debug!("No next-page link on {}", final_url);
            return;
        };

        let Some(next) = resolve_href(final_url, &href) else {
            tracing::debug!("Next-page link '{}' on {} is not followable", href, final_url);
            return;
        };

        if self.visited.contains(next.as_str()) {
            tracing::info!("Next-page link {} was already visited, stopping", next);
            return;
        }

        if self.same_host_only && !same_host(&self.base, &next) {
            tracing::info!("Next-page link {} leaves the target host, stopping", next);
            return;
        }

        self.pending = Some(next);
    }

    /// Number of pages handed out so far
    pub fn pages_yielded(&self) -> u32 {
        self.yielded
    }
}
