//! Rate limiting between page fetches
//!
//! The limiter enforces a minimum gap between the starts of consecutive
//! fetches against the target host. The gap is the larger of the configured
//! delay and any crawl delay announced by the host's robots.txt, so the
//! floor can only rise over the course of a run.

use std::time::{Duration, Instant};

/// Enforces the minimum delay between fetches
#[derive(Debug)]
pub struct RateLimiter {
    /// Minimum gap between fetch starts
    delay: Duration,

    /// When the most recent fetch started
    last_fetch: Option<Instant>,
}

impl RateLimiter {
    /// Creates a limiter with the given minimum delay
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_fetch: None,
        }
    }

    /// Raises the enforced delay to at least `floor`
    ///
    /// A floor below the current delay has no effect. This is how a
    /// robots.txt crawl delay overrides a smaller configured delay.
    pub fn raise_delay_floor(&mut self, floor: Duration) {
        self.delay = std::cmp::max(self.delay, floor);
    }

    /// Returns the currently enforced delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits until the next fetch is allowed to start
    ///
    /// The first call of a run returns immediately. Later calls sleep for
    /// whatever remains of the delay since the previous recorded fetch.
    pub async fn wait_until_ready(&self) {
        if let Some(last) = self.last_fetch {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                let remaining = self.delay - elapsed;
                tracing::trace!("Rate limit: sleeping {:?}", remaining);
                tokio::time::sleep(remaining).await;
            }
        }
    }

    /// Marks the start of a fetch
    pub fn record_fetch(&mut self) {
        self.last_fetch = Some(Instant::now());
    }
}
