//! HTTP fetcher implementation
//!
//! This module builds the HTTP client used for a whole run and performs the
//! page fetches: one GET per call, no internal retry. Redirects are followed
//! by the client's default policy; the final URL after redirects lands in
//! the result so the next-page link can be resolved against it.

use crate::config::RequestConfig;
use crate::{ConfigError, FetchError, SiftError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct PageResult {
    /// Final URL after redirects
    pub url: Url,

    /// HTTP status code
    pub status: u16,

    /// Content-Type header value, if the server sent one
    pub content_type: Option<String>,

    /// Page body
    pub body: String,
}

/// Builds the HTTP client used for every request of a run
///
/// The client carries the configured user agent, static headers and
/// timeout. Compressed responses are handled transparently.
///
/// # Arguments
///
/// * `config` - The request configuration
///
/// # Example
///
/// ```no_run
/// use pagesift::config::RequestConfig;
/// use pagesift::scrape::build_http_client;
///
/// let client = build_http_client(&RequestConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &RequestConfig) -> crate::Result<Client> {
    let mut headers = HeaderMap::new();
    for (raw_name, raw_value) in &config.headers {
        let name = HeaderName::from_bytes(raw_name.as_bytes()).map_err(|_| {
            SiftError::Config(ConfigError::Validation(format!(
                "Invalid header name '{}'",
                raw_name
            )))
        })?;
        let value = HeaderValue::from_str(raw_value).map_err(|_| {
            SiftError::Config(ConfigError::Validation(format!(
                "Invalid value for header '{}'",
                raw_name
            )))
        })?;
        headers.insert(name, value);
    }

    let client = Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(config.timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a single page
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Errors
///
/// * [`FetchError::Timeout`] - the request timed out
/// * [`FetchError::Connection`] - the host could not be reached or the
///   transfer broke off
/// * [`FetchError::HttpStatus`] - the server answered with a non-2xx status
pub async fn fetch_page(client: &Client, url: Url) -> Result<PageResult, FetchError> {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().clone();

            if !status.is_success() {
                return Err(FetchError::HttpStatus(status.as_u16()));
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            match response.text().await {
                Ok(body) => Ok(PageResult {
                    url: final_url,
                    status: status.as_u16(),
                    content_type,
                    body,
                }),
                Err(e) => Err(classify_error(e)),
            }
        }
        Err(e) => Err(classify_error(e)),
    }
}

/// Maps a reqwest error onto the fetch failure taxonomy
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Connection(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn url_of(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&RequestConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_client_rejects_bad_header() {
        let mut config = RequestConfig::default();
        config
            .headers
            .insert("bad header".to_string(), "x".to_string());

        let result = build_http_client(&config);
        assert!(matches!(
            result.unwrap_err(),
            SiftError::Config(ConfigError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>ok</body></html>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let client = build_http_client(&RequestConfig::default()).unwrap();
        let page = fetch_page(&client, url_of(&server, "/list")).await.unwrap();

        assert_eq!(page.status, 200);
        assert_eq!(
            page.content_type.as_deref(),
            Some("text/html; charset=utf-8")
        );
        assert!(page.body.contains("ok"));
    }

    #[tokio::test]
    async fn test_fetch_sends_configured_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list"))
            .and(header("accept-language", "en"))
            .and(header("user-agent", "pagesift-test/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = RequestConfig::default();
        config.user_agent = "pagesift-test/1.0".to_string();
        config
            .headers
            .insert("accept-language".to_string(), "en".to_string());

        let client = build_http_client(&config).unwrap();
        let result = fetch_page(&client, url_of(&server, "/list")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client(&RequestConfig::default()).unwrap();
        let err = fetch_page(&client, url_of(&server, "/gone"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::HttpStatus(404)));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/new"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let client = build_http_client(&RequestConfig::default()).unwrap();
        let page = fetch_page(&client, url_of(&server, "/old")).await.unwrap();

        assert_eq!(page.url.path(), "/new");
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let client = build_http_client(&RequestConfig::default()).unwrap();
        let url = Url::parse("http://127.0.0.1:1/list").unwrap();

        let err = fetch_page(&client, url).await.unwrap_err();
        assert!(matches!(err, FetchError::Connection(_)));
        assert!(err.is_unreachable());
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let config = RequestConfig {
            timeout_seconds: 1,
            ..Default::default()
        };
        let client = build_http_client(&config).unwrap();

        let err = fetch_page(&client, url_of(&server, "/slow"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout));
    }
}
