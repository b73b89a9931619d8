//! Robots.txt policy parsing
//!
//! This module wraps the robotstxt crate's matcher and adds Crawl-delay
//! extraction, which that crate does not expose.

use robotstxt::DefaultMatcher;

/// A site's robots.txt policy
///
/// [`RobotsPolicy::absent`] stands in for origins without a usable
/// robots.txt; it allows everything and carries no crawl delay.
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    body: Option<String>,
}

impl RobotsPolicy {
    /// Creates a policy from raw robots.txt content
    ///
    /// Blank content is indistinguishable from no policy at all, so it
    /// collapses to [`RobotsPolicy::absent`].
    pub fn from_content(body: &str) -> Self {
        if body.trim().is_empty() {
            return Self::absent();
        }
        RobotsPolicy {
            body: Some(body.to_string()),
        }
    }

    /// The permissive policy used when no robots.txt is available
    pub fn absent() -> Self {
        RobotsPolicy { body: None }
    }

    /// True when actual robots.txt rules back this policy
    pub fn has_rules(&self) -> bool {
        self.body.is_some()
    }

    /// Checks whether a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - Full URL or path to check (e.g. "/list?page=2")
    /// * `user_agent` - The user agent string
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        match &self.body {
            Some(body) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(body, user_agent, url)
            }
            None => true,
        }
    }

    /// Extracts the Crawl-delay for a user agent
    ///
    /// The directive applies to the user-agent group it appears under. A
    /// group that names the agent wins over the `*` group. Returns the
    /// delay in seconds.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        let body = self.body.as_deref()?;
        let target = user_agent.to_lowercase();

        // Consecutive User-agent lines form one group; any other directive
        // ends the group header.
        let mut group: Vec<String> = Vec::new();
        let mut reading_agents = false;
        let mut wildcard_delay: Option<f64> = None;
        let mut agent_delay: Option<f64> = None;

        for line in body.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    if !reading_agents {
                        group.clear();
                    }
                    group.push(value.to_lowercase());
                    reading_agents = true;
                }
                "crawl-delay" => {
                    reading_agents = false;
                    let Ok(delay) = value.parse::<f64>() else {
                        continue;
                    };
                    if !delay.is_finite() || delay < 0.0 {
                        continue;
                    }
                    if group.iter().any(|ua| ua != "*" && target.contains(ua.as_str())) {
                        agent_delay = Some(delay);
                    } else if group.iter().any(|ua| ua == "*") {
                        wildcard_delay = Some(delay);
                    }
                }
                _ => {
                    reading_agents = false;
                }
            }
        }

        agent_delay.or(wildcard_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_allows_everything() {
        let robots = RobotsPolicy::absent();
        assert!(robots.is_allowed("/any/path", "TestBot"));
        assert!(robots.is_allowed("/admin", "TestBot"));
        assert!(!robots.has_rules());
    }

    #[test]
    fn test_blank_content_collapses_to_absent() {
        let robots = RobotsPolicy::from_content("  \n  ");
        assert!(!robots.has_rules());
        assert!(robots.is_allowed("/any/path", "TestBot"));
    }

    #[test]
    fn test_disallow_all() {
        let robots = RobotsPolicy::from_content("User-agent: *\nDisallow: /");
        assert!(!robots.is_allowed("/", "TestBot"));
        assert!(!robots.is_allowed("/list", "TestBot"));
    }

    #[test]
    fn test_disallow_specific_path() {
        let robots = RobotsPolicy::from_content("User-agent: *\nDisallow: /admin");
        assert!(robots.is_allowed("/", "TestBot"));
        assert!(robots.is_allowed("/list", "TestBot"));
        assert!(!robots.is_allowed("/admin", "TestBot"));
        assert!(!robots.is_allowed("/admin/users", "TestBot"));
    }

    #[test]
    fn test_full_url_is_reduced_to_path() {
        let robots = RobotsPolicy::from_content("User-agent: *\nDisallow: /list");
        assert!(!robots.is_allowed("http://example.test/list?page=2", "TestBot"));
        assert!(robots.is_allowed("http://example.test/about", "TestBot"));
    }

    #[test]
    fn test_allow_overrides_disallow() {
        let robots =
            RobotsPolicy::from_content("User-agent: *\nDisallow: /private\nAllow: /private/public");
        assert!(!robots.is_allowed("/private", "TestBot"));
        assert!(robots.is_allowed("/private/public", "TestBot"));
    }

    #[test]
    fn test_specific_user_agent_group() {
        let robots = RobotsPolicy::from_content(
            "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /",
        );
        assert!(robots.is_allowed("/list", "GoodBot"));
        assert!(!robots.is_allowed("/list", "BadBot"));
    }

    #[test]
    fn test_garbage_content_allows() {
        let robots = RobotsPolicy::from_content("This is not valid robots.txt {{{");
        assert!(robots.is_allowed("/any/path", "TestBot"));
    }

    #[test]
    fn test_crawl_delay_wildcard() {
        let robots =
            RobotsPolicy::from_content("User-agent: *\nCrawl-delay: 10\nDisallow: /admin");
        assert_eq!(robots.crawl_delay("TestBot"), Some(10.0));
        assert_eq!(robots.crawl_delay("AnyBot"), Some(10.0));
    }

    #[test]
    fn test_crawl_delay_specific_agent_wins() {
        let robots = RobotsPolicy::from_content(
            "User-agent: TestBot\nCrawl-delay: 5\n\nUser-agent: *\nCrawl-delay: 10",
        );
        assert_eq!(robots.crawl_delay("TestBot"), Some(5.0));
        assert_eq!(robots.crawl_delay("OtherBot"), Some(10.0));
    }

    #[test]
    fn test_crawl_delay_absent() {
        let robots = RobotsPolicy::from_content("User-agent: *\nDisallow: /admin");
        assert_eq!(robots.crawl_delay("TestBot"), None);
        assert_eq!(RobotsPolicy::absent().crawl_delay("TestBot"), None);
    }

    #[test]
    fn test_crawl_delay_decimal() {
        let robots = RobotsPolicy::from_content("User-agent: *\nCrawl-delay: 2.5");
        assert_eq!(robots.crawl_delay("TestBot"), Some(2.5));
    }

    #[test]
    fn test_crawl_delay_case_insensitive() {
        let robots = RobotsPolicy::from_content("User-agent: TestBot\ncrawl-delay: 7");
        assert_eq!(robots.crawl_delay("testbot"), Some(7.0));
        assert_eq!(robots.crawl_delay("TESTBOT"), Some(7.0));
    }

    #[test]
    fn test_crawl_delay_multiple_agents_share_group() {
        let robots =
            RobotsPolicy::from_content("User-agent: BotA\nUser-agent: BotB\nCrawl-delay: 3");
        assert_eq!(robots.crawl_delay("BotA"), Some(3.0));
        assert_eq!(robots.crawl_delay("BotB"), Some(3.0));
        assert_eq!(robots.crawl_delay("BotC"), None);
    }

    #[test]
    fn test_crawl_delay_survives_other_directives() {
        let robots = RobotsPolicy::from_content(
            "User-agent: *\nDisallow: /admin\nCrawl-delay: 4\nAllow: /public",
        );
        assert_eq!(robots.crawl_delay("TestBot"), Some(4.0));
    }

    #[test]
    fn test_crawl_delay_ignores_comments_and_junk() {
        let robots = RobotsPolicy::from_content(
            "User-agent: * # everyone\nCrawl-delay: 5 # be gentle\nCrawl-delay: oops",
        );
        assert_eq!(robots.crawl_delay("TestBot"), Some(5.0));
    }

    #[test]
    fn test_crawl_delay_rejects_negative() {
        let robots = RobotsPolicy::from_content("User-agent: *\nCrawl-delay: -3");
        assert_eq!(robots.crawl_delay("TestBot"), None);
    }
}
