//! Robots.txt gate with a per-run cache
//!
//! The gate is the run loop's single entry point for robots decisions. It
//! owns a cache keyed by URL origin, so each origin's robots.txt is fetched
//! at most once per run. A robots.txt that cannot be fetched fails open:
//! the page fetch proceeds and a warning is logged.

use crate::robots::RobotsPolicy;
use crate::url::origin_key;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Ceiling for crawl delays taken from robots.txt. Sites can put any number
/// there; more than an hour between fetches is treated as an hour.
const MAX_CRAWL_DELAY: Duration = Duration::from_secs(3600);

/// Decides whether pages may be fetched, consulting per-origin robots.txt
///
/// Constructed and owned by the run loop; a fresh gate starts with an empty
/// cache. With `enabled = false` every URL is allowed and nothing is ever
/// fetched.
#[derive(Debug)]
pub struct RobotsGate {
    enabled: bool,
    user_agent: String,
    cache: HashMap<String, RobotsPolicy>,
}

impl RobotsGate {
    pub fn new(enabled: bool, user_agent: impl Into<String>) -> Self {
        RobotsGate {
            enabled,
            user_agent: user_agent.into(),
            cache: HashMap::new(),
        }
    }

    /// Checks whether the given page URL may be fetched
    ///
    /// The first call for an origin fetches its robots.txt through the
    /// supplied client; later calls for the same origin hit the cache.
    pub async fn allows(&mut self, client: &Client, url: &Url) -> bool {
        if !self.enabled {
            return true;
        }

        let key = origin_key(url);
        if !self.cache.contains_key(&key) {
            let policy = fetch_policy(client, url).await;
            self.cache.insert(key.clone(), policy);
        }

        self.cache
            .get(&key)
            .map(|policy| policy.is_allowed(url.as_str(), &self.user_agent))
            .unwrap_or(true)
    }

    /// Crawl-delay from the cached policy for this URL's origin
    ///
    /// Only meaningful after [`RobotsGate::allows`] has run for the origin.
    /// Delays are capped at one hour; a value that does not convert to a
    /// `Duration` is ignored.
    pub fn crawl_delay(&self, url: &Url) -> Option<Duration> {
        if !self.enabled {
            return None;
        }

        let policy = self.cache.get(&origin_key(url))?;
        let secs = policy.crawl_delay(&self.user_agent)?;
        let delay = Duration::try_from_secs_f64(secs).ok()?;
        Some(delay.min(MAX_CRAWL_DELAY))
    }

    /// Number of origins with a cached policy
    pub fn cached_origins(&self) -> usize {
        self.cache.len()
    }
}

/// Fetches and parses an origin's robots.txt
///
/// Never errors: anything short of a readable 2xx body degrades to
/// [`RobotsPolicy::absent`]. A 404 is the ordinary "no policy" case and only
/// logged at debug; transport failures and unexpected statuses warn, since
/// the operator may want to know the site could not be asked.
async fn fetch_policy(client: &Client, url: &Url) -> RobotsPolicy {
    let robots_url = match robots_url_for(url) {
        Some(u) => u,
        None => {
            tracing::warn!("cannot derive a robots.txt URL for {}, proceeding", url);
            return RobotsPolicy::absent();
        }
    };

    tracing::debug!("fetching {}", robots_url);

    match client.get(robots_url.clone()).send().await {
        Ok(response) if response.status().is_success() => match response.text().await {
            Ok(body) => RobotsPolicy::from_content(&body),
            Err(e) => {
                tracing::warn!("failed to read robots.txt from {}: {}, proceeding", robots_url, e);
                RobotsPolicy::absent()
            }
        },
        Ok(response) if response.status() == reqwest::StatusCode::NOT_FOUND => {
            tracing::debug!("no robots.txt at {} (404)", robots_url);
            RobotsPolicy::absent()
        }
        Ok(response) => {
            tracing::warn!(
                "robots.txt at {} returned status {}, proceeding",
                robots_url,
                response.status()
            );
            RobotsPolicy::absent()
        }
        Err(e) => {
            tracing::warn!("failed to fetch robots.txt from {}: {}, proceeding", robots_url, e);
            RobotsPolicy::absent()
        }
    }
}

/// The robots.txt URL for a page's origin
fn robots_url_for(url: &Url) -> Option<Url> {
    url.host_str()?;
    let mut robots = url.clone();
    robots.set_path("/robots.txt");
    robots.set_query(None);
    robots.set_fragment(None);
    Some(robots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_url(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    #[test]
    fn test_robots_url_for() {
        let url = Url::parse("http://example.test:8080/list?page=3#frag").unwrap();
        let robots = robots_url_for(&url).unwrap();
        assert_eq!(robots.as_str(), "http://example.test:8080/robots.txt");
    }

    #[tokio::test]
    async fn test_disabled_gate_never_fetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"))
            .expect(0)
            .mount(&server)
            .await;

        let client = Client::new();
        let mut gate = RobotsGate::new(false, "pagesift-test/1.0");

        assert!(gate.allows(&client, &page_url(&server, "/list")).await);
        assert_eq!(gate.cached_origins(), 0);
    }

    #[tokio::test]
    async fn test_disallowed_path_and_cache_reuse() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /list"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new();
        let mut gate = RobotsGate::new(true, "pagesift-test/1.0");

        assert!(!gate.allows(&client, &page_url(&server, "/list?page=1")).await);
        assert!(!gate.allows(&client, &page_url(&server, "/list?page=2")).await);
        assert!(gate.allows(&client, &page_url(&server, "/about")).await);
        assert_eq!(gate.cached_origins(), 1);
    }

    #[tokio::test]
    async fn test_missing_robots_allows() {
        let server = MockServer::start().await;
        // No robots.txt mock mounted: wiremock answers 404

        let client = Client::new();
        let mut gate = RobotsGate::new(true, "pagesift-test/1.0");

        assert!(gate.allows(&client, &page_url(&server, "/list")).await);
    }

    #[tokio::test]
    async fn test_server_error_fails_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new();
        let mut gate = RobotsGate::new(true, "pagesift-test/1.0");

        assert!(gate.allows(&client, &page_url(&server, "/list")).await);
        // Failure result is cached too; the origin is not probed again
        assert!(gate.allows(&client, &page_url(&server, "/other")).await);
    }

    #[tokio::test]
    async fn test_unreachable_host_fails_open() {
        let client = Client::new();
        let mut gate = RobotsGate::new(true, "pagesift-test/1.0");

        let url = Url::parse("http://127.0.0.1:1/list").unwrap();
        assert!(gate.allows(&client, &url).await);
    }

    #[tokio::test]
    async fn test_crawl_delay_exposed_after_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("User-agent: *\nCrawl-delay: 2\nDisallow: /admin"),
            )
            .mount(&server)
            .await;

        let client = Client::new();
        let mut gate = RobotsGate::new(true, "pagesift-test/1.0");
        let url = page_url(&server, "/list");

        assert!(gate.allows(&client, &url).await);
        assert_eq!(gate.crawl_delay(&url), Some(Duration::from_secs(2)));
    }

    #[tokio::test]
    async fn test_overflowing_crawl_delay_is_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("User-agent: *\nCrawl-delay: 1e300\nAllow: /"),
            )
            .mount(&server)
            .await;

        let client = Client::new();
        let mut gate = RobotsGate::new(true, "pagesift-test/1.0");
        let url = page_url(&server, "/list");

        assert!(gate.allows(&client, &url).await);
        assert_eq!(gate.crawl_delay(&url), None);
    }

    #[tokio::test]
    async fn test_crawl_delay_is_capped_at_an_hour() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("User-agent: *\nCrawl-delay: 86400\nAllow: /"),
            )
            .mount(&server)
            .await;

        let client = Client::new();
        let mut gate = RobotsGate::new(true, "pagesift-test/1.0");
        let url = page_url(&server, "/list");

        assert!(gate.allows(&client, &url).await);
        assert_eq!(gate.crawl_delay(&url), Some(Duration::from_secs(3600)));
    }

    #[tokio::test]
    async fn test_specific_agent_disallow() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "User-agent: pagesift\nDisallow: /\n\nUser-agent: *\nAllow: /",
            ))
            .mount(&server)
            .await;

        let client = Client::new();
        let mut gate = RobotsGate::new(true, "pagesift/1.0");

        assert!(!gate.allows(&client, &page_url(&server, "/list")).await);
    }
}
