//! News search API access.
//!
//! The module uses a trait-based design so the pipeline can run against a
//! recording double in tests:
//! - [`SearchTransport`]: one request in, one parsed response out
//! - [`ReqwestTransport`]: the real HTTPS client with a bounded timeout
//! - [`fetch_news`]: builds the request from [`Config`] and returns the items
//!
//! There is deliberately no retry layer. A failed call ends the run.

use crate::cli::SortMode;
use crate::config::{Config, Credentials};
use crate::error::NewsError;
use crate::models::{ApiErrorBody, SearchResponse, SearchResultItem};
use crate::utils::truncate_for_log;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};
use url::Url;

/// Naver news search endpoint (JSON flavour).
pub const NEWS_SEARCH_URL: &str = "https://openapi.naver.com/v1/search/news.json";

/// Upper bound on the whole request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const CLIENT_ID_HEADER: &str = "X-Naver-Client-Id";
const CLIENT_SECRET_HEADER: &str = "X-Naver-Client-Secret";

/// A fully resolved search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub display: u8,
    /// Always 1; only the first page is fetched.
    pub start: u32,
    pub sort: SortMode,
    pub credentials: Credentials,
}

impl SearchRequest {
    pub fn from_config(config: &Config) -> Self {
        SearchRequest {
            query: config.query.clone(),
            display: config.display,
            start: 1,
            sort: config.sort,
            credentials: config.credentials.clone(),
        }
    }

    /// Query-string parameters in the order they are sent.
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("query", self.query.clone()),
            ("display", self.display.to_string()),
            ("start", self.start.to_string()),
            ("sort", self.sort.as_str().to_string()),
        ]
    }
}

/// Trait for issuing a single search call.
pub trait SearchTransport {
    /// Send `request` and parse the response body.
    ///
    /// Implementations must not retry and must surface non-success statuses
    /// as errors.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, NewsError>;
}

/// HTTPS transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl ReqwestTransport {
    /// Transport for the production endpoint.
    pub fn new() -> Result<Self, NewsError> {
        Self::with_endpoint(NEWS_SEARCH_URL)
    }

    /// Transport for an arbitrary endpoint, e.g. a local mock server.
    pub fn with_endpoint(endpoint: &str) -> Result<Self, NewsError> {
        Self::with_timeout(endpoint, REQUEST_TIMEOUT)
    }

    /// Transport for `endpoint` whose requests give up after `timeout`.
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self, NewsError> {
        let endpoint = Url::parse(endpoint)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ReqwestTransport { client, endpoint })
    }
}

impl SearchTransport for ReqwestTransport {
    #[instrument(level = "info", skip_all, fields(endpoint = %self.endpoint, query = %request.query, display = request.display, sort = request.sort.as_str()))]
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, NewsError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(request.query_pairs());

        let t0 = Instant::now();
        let resp = self
            .client
            .get(url)
            .header(CLIENT_ID_HEADER, &request.credentials.client_id)
            .header(CLIENT_SECRET_HEADER, &request.credentials.client_secret)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        let elapsed_ms = t0.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(ApiErrorBody {
                    error_message,
                    error_code: Some(code),
                }) => format!("{error_message} ({code})"),
                Ok(ApiErrorBody { error_message, .. }) => error_message,
                Err(_) => truncate_for_log(&body, 300),
            };
            error!(%status, %message, elapsed_ms, "Search API returned an error status");
            return Err(NewsError::HttpStatus { status, message });
        }

        let parsed: SearchResponse = serde_json::from_str(&body).inspect_err(|e| {
            error!(error = %e, body_preview = %truncate_for_log(&body, 300), "Search response did not decode");
        })?;
        info!(
            items = parsed.items.len(),
            total = ?parsed.total,
            start = ?parsed.start,
            display = ?parsed.display,
            last_build_date = ?parsed.last_build_date,
            elapsed_ms,
            "Fetched news search results"
        );
        Ok(parsed)
    }
}

/// Run the configured search and return its items in API order.
#[instrument(level = "info", skip_all)]
pub async fn fetch_news<T: SearchTransport>(
    transport: &T,
    config: &Config,
) -> Result<Vec<SearchResultItem>, NewsError> {
    let request = SearchRequest::from_config(config);
    let response = transport.search(&request).await?;
    Ok(response.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::path::PathBuf;

    const PATH: &str = "/v1/search/news.json";

    fn config(display: u8) -> Config {
        Config {
            query: "기업".to_string(),
            display,
            sort: SortMode::Date,
            credentials: Credentials {
                client_id: "test-id".to_string(),
                client_secret: "test-secret".to_string(),
            },
            readme_path: PathBuf::from("README.md"),
        }
    }

    fn transport(server: &mockito::Server) -> ReqwestTransport {
        ReqwestTransport::with_endpoint(&format!("{}{}", server.url(), PATH)).unwrap()
    }

    #[test]
    fn test_request_from_config() {
        let request = SearchRequest::from_config(&config(100));
        assert_eq!(
            request.query_pairs(),
            [
                ("query", "기업".to_string()),
                ("display", "100".to_string()),
                ("start", "1".to_string()),
                ("sort", "date".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_sends_params_and_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "기업".into()),
                Matcher::UrlEncoded("display".into(), "5".into()),
                Matcher::UrlEncoded("start".into(), "1".into()),
                Matcher::UrlEncoded("sort".into(), "date".into()),
            ]))
            .match_header("X-Naver-Client-Id", "test-id")
            .match_header("X-Naver-Client-Secret", "test-secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"total": 2, "items": [
                    {"title": "first", "link": "https://n.news.naver.com/1", "pubDate": "Tue, 06 May 2025 14:03:00 +0900"},
                    {"title": "second", "link": "https://n.news.naver.com/2", "pubDate": "Tue, 06 May 2025 13:00:00 +0900"}
                ]}"#,
            )
            .create_async()
            .await;

        let items = fetch_news(&transport(&server), &config(5)).await.unwrap();

        mock.assert_async().await;
        let titles: Vec<_> = items.iter().map(|i| i.title.as_deref().unwrap()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_search_without_items_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"total": 0, "start": 1, "display": 0}"#)
            .create_async()
            .await;

        let items = fetch_news(&transport(&server), &config(10)).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_uses_api_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"errorMessage": "Authentication failed", "errorCode": "024"}"#)
            .create_async()
            .await;

        let err = fetch_news(&transport(&server), &config(10)).await.unwrap_err();
        match err {
            NewsError::HttpStatus { status, message } => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(message, "Authentication failed (024)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_with_plain_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let err = fetch_news(&transport(&server), &config(10)).await.unwrap_err();
        match err {
            NewsError::HttpStatus { status, message } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = fetch_news(&transport(&server), &config(10)).await.unwrap_err();
        assert!(matches!(err, NewsError::Decode(_)));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept connections and hold them open without ever answering.
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let transport =
            ReqwestTransport::with_timeout(&format!("http://{addr}{PATH}"), Duration::from_millis(200))
                .unwrap();
        let err = fetch_news(&transport, &config(10)).await.unwrap_err();
        server.abort();

        match err {
            NewsError::Http(e) => assert!(e.is_timeout(), "expected timeout, got {e}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_closed_port_is_http_error() {
        let addr = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let transport =
            ReqwestTransport::with_timeout(&format!("http://{addr}{PATH}"), Duration::from_secs(5))
                .unwrap();
        let err = fetch_news(&transport, &config(10)).await.unwrap_err();

        match err {
            NewsError::Http(e) => assert!(e.is_connect(), "expected connect error, got {e}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = ReqwestTransport::with_endpoint("not a url").unwrap_err();
        assert!(matches!(err, NewsError::InvalidEndpoint(_)));
    }
}
