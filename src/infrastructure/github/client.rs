//! GitHub search API client
//!
//! Issues exactly one request per call. Retries, caching and circuit
//! breaking live in the layers wrapping this client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tracing::debug;

use super::convert::to_repository_records;
use super::types::GitHubSearchResponse;
use crate::domain::{
    build_query, query_clauses, DomainError, RepositoryProvider, RepositoryRecord, SearchFilter,
    UpstreamError, CLAUSE_SEPARATOR,
};
use crate::infrastructure::observability::record_upstream_request;

const DEFAULT_GITHUB_SEARCH_URL: &str = "https://api.github.com/search";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Configuration for the GitHub client
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// Search API base URL; `/repositories` is appended
    pub base_url: String,
    /// Bound applied to connecting and to the whole request
    pub timeout: Duration,
    /// Largest response body held in memory
    pub max_response_bytes: usize,
    /// Personal access token, raises the search rate limit when set
    pub token: Option<String>,
    pub user_agent: String,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GITHUB_SEARCH_URL.to_string(),
            timeout: Duration::from_millis(5000),
            max_response_bytes: 16 * 1024 * 1024,
            token: None,
            user_agent: concat!("repo-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GitHubClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_response_bytes(mut self, bytes: usize) -> Self {
        self.max_response_bytes = bytes;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Repository provider backed by the GitHub search API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    search_url: String,
    config: GitHubClientConfig,
}

impl GitHubClient {
    pub fn new(config: GitHubClientConfig) -> Result<Self, DomainError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build GitHub HTTP client: {}", e))
            })?;

        let search_url = format!("{}/repositories", config.base_url.trim_end_matches('/'));

        Ok(Self {
            client,
            search_url,
            config,
        })
    }

    /// Full request URL for a filter
    ///
    /// Each clause of `q` is percent-encoded on its own and the clauses are
    /// joined with a raw separator, so only the separator reaches the
    /// upstream as a space. A `+` inside a language value stays `%2B`.
    fn request_url(&self, filter: &SearchFilter) -> String {
        let encoded = query_clauses(filter.language(), filter.created_since())
            .iter()
            .map(|clause| urlencoding::encode(clause).into_owned())
            .collect::<Vec<_>>()
            .join(&CLAUSE_SEPARATOR.to_string());

        let mut url = format!("{}?q={}&sort=stars&order=desc", self.search_url, encoded);

        if let Some(page_size) = filter.page_size() {
            url.push_str(&format!("&per_page={}", page_size));
        }

        url
    }

    fn map_request_error(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::timeout(self.config.timeout.as_millis() as u64)
        } else {
            UpstreamError::transport(error.to_string())
        }
    }

    /// Reads the body while enforcing the in-memory size cap
    async fn read_body(&self, mut response: reqwest::Response) -> Result<Bytes, UpstreamError> {
        let limit = self.config.max_response_bytes;

        if response.content_length().is_some_and(|len| len > limit as u64) {
            return Err(UpstreamError::payload_too_large(limit));
        }

        let mut body = BytesMut::new();

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.map_request_error(e))?
        {
            if body.len() + chunk.len() > limit {
                return Err(UpstreamError::payload_too_large(limit));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body.freeze())
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<RepositoryRecord>, UpstreamError> {
        let url = self.request_url(filter);
        debug!(
            query = %build_query(filter.language(), filter.created_since()),
            url = %url,
            "Querying upstream search API"
        );

        let mut request = self.client.get(&url);

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();

        if !status.is_success() {
            let body = self
                .read_body(response)
                .await
                .map(|bytes| {
                    String::from_utf8_lossy(&bytes)
                        .chars()
                        .take(MAX_ERROR_BODY_CHARS)
                        .collect::<String>()
                })
                .unwrap_or_default();

            return Err(UpstreamError::status(status.as_u16(), body));
        }

        let body = self.read_body(response).await?;

        let payload: GitHubSearchResponse = serde_json::from_slice(&body)
            .map_err(|e| UpstreamError::malformed(format!("Failed to parse response: {}", e)))?;

        if payload.incomplete_results == Some(true) {
            debug!("Upstream reported incomplete results");
        }

        to_repository_records(payload)
    }
}

#[async_trait]
impl RepositoryProvider for GitHubClient {
    async fn fetch(&self, filter: &SearchFilter) -> Result<Vec<RepositoryRecord>, UpstreamError> {
        let start = Instant::now();
        let result = self.search(filter).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        record_upstream_request(outcome, start.elapsed());

        result
    }
}
