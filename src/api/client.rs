//! HTTP implementation of the content repository
//!
//! This module handles all requests to the content API, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Endpoint URL construction with proper path and query encoding
//! - Status and decode error classification

use crate::api::repository::ContentRepository;
use crate::api::types::{CrawlRequest, CrawlResponse, InfluencersResponse, PostsResponse};
use crate::config::{ApiConfig, UserAgentConfig};
use crate::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use pulse_browser::api::build_http_client;
/// use pulse_browser::config::Config;
///
/// let config = Config::default();
/// let client = build_http_client(&config.api, &config.user_agent).unwrap();
/// ```
pub fn build_http_client(
    api: &ApiConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    // Format: ClientName/Version
    let user_agent = format!("{}/{}", user_agent.client_name, user_agent.client_version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(api.request_timeout())
        .connect_timeout(api.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Content repository backed by the remote HTTP API
#[derive(Debug, Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
    timeout_millis: u64,
}

impl HttpRepository {
    /// Creates a repository for the given API configuration
    pub fn new(api: &ApiConfig, user_agent: &UserAgentConfig) -> ApiResult<Self> {
        let base_url = Url::parse(&api.base_url)?;
        let client = build_http_client(api, user_agent).map_err(|source| ApiError::Http {
            url: api.base_url.clone(),
            source,
        })?;

        Ok(Self::with_client(client, base_url, api.request_timeout_secs * 1000))
    }

    /// Creates a repository around an existing client
    pub fn with_client(client: Client, base_url: Url, timeout_millis: u64) -> Self {
        Self {
            client,
            base_url,
            timeout_millis,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn classify(&self, url: &Url, source: reqwest::Error) -> ApiError {
        if source.is_timeout() {
            ApiError::Timeout {
                millis: self.timeout_millis,
            }
        } else {
            ApiError::Http {
                url: url.to_string(),
                source,
            }
        }
    }

    /// Checks the status and decodes the JSON body
    async fn decode<T: DeserializeOwned>(&self, url: &Url, response: Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(url, e))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ContentRepository for HttpRepository {
    async fn search_influencers(&self, query: &str) -> ApiResult<InfluencersResponse> {
        let mut url = self.endpoint(&["influencers"]);
        url.query_pairs_mut().append_pair("search", query);

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;

        self.decode(&url, response).await
    }

    async fn list_posts(
        &self,
        social_account_id: &str,
        page: u32,
        limit: u32,
    ) -> ApiResult<PostsResponse> {
        let mut url = self.endpoint(&["accounts", social_account_id, "posts"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;

        self.decode(&url, response).await
    }

    async fn trigger_crawl(
        &self,
        username: &str,
        max_collect_count: u32,
    ) -> ApiResult<CrawlResponse> {
        let url = self.endpoint(&["crawl"]);
        let body = CrawlRequest {
            username: username.to_string(),
            max_collect_count,
        };

        tracing::debug!("POST {} for {}", url, username);
        let response = self
            .client
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;

        let crawl: CrawlResponse = self.decode(&url, response).await?;
        if !crawl.success {
            return Err(ApiError::Rejected(
                crawl
                    .message
                    .unwrap_or_else(|| "backend refused the crawl".to_string()),
            ));
        }

        Ok(crawl)
    }
}
