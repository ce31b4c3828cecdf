//! `reqwest`-backed [`LiveClient`].

use crate::{ClientError, LiveClient};
use async_trait::async_trait;
use estate_types::{
    Chair, ChairSearchCondition, ChairsResponse, Coordinates, Estate, EstateSearchCondition,
    EstatesResponse,
};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Connection settings for [`HttpLiveClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the application (e.g., "http://localhost:1323").
    pub base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1323".to_string(),
            request_timeout: Duration::from_secs(10),
            user_agent: concat!("estate-bench/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP client for the application's public API.
///
/// Cheap to share: `reqwest::Client` pools connections internally and holds
/// no per-call state.
#[derive(Debug, Clone)]
pub struct HttpLiveClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpLiveClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ClientError::Config(format!("invalid base URL {}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(String, String)],
    ) -> Result<T, ClientError> {
        let url = self.endpoint(segments);
        debug!("GET {}", url);
        let response = self.http.get(url).query(query).send().await?;
        decode(response).await
    }

    /// Like [`get`](Self::get), but maps `404 Not Found` to `Ok(None)`.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<T>, ClientError> {
        let url = self.endpoint(segments);
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status(status.as_u16()));
    }
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl LiveClient for HttpLiveClient {
    async fn chair_detail(&self, id: &str) -> Result<Option<Chair>, ClientError> {
        self.get_optional(&["api", "chair", id]).await
    }

    async fn chair_search_condition(&self) -> Result<ChairSearchCondition, ClientError> {
        self.get(&["api", "chair", "search", "condition"], &[]).await
    }

    async fn search_chairs(
        &self,
        query: &[(String, String)],
    ) -> Result<ChairsResponse, ClientError> {
        self.get(&["api", "chair", "search"], query).await
    }

    async fn low_priced_chairs(&self) -> Result<ChairsResponse, ClientError> {
        self.get(&["api", "chair", "low_priced"], &[]).await
    }

    async fn estate_detail(&self, id: &str) -> Result<Option<Estate>, ClientError> {
        self.get_optional(&["api", "estate", id]).await
    }

    async fn estate_search_condition(&self) -> Result<EstateSearchCondition, ClientError> {
        self.get(&["api", "estate", "search", "condition"], &[]).await
    }

    async fn search_estates(
        &self,
        query: &[(String, String)],
    ) -> Result<EstatesResponse, ClientError> {
        self.get(&["api", "estate", "search"], query).await
    }

    async fn low_priced_estates(&self) -> Result<EstatesResponse, ClientError> {
        self.get(&["api", "estate", "low_priced"], &[]).await
    }

    async fn recommended_estates_for_chair(
        &self,
        chair_id: i64,
    ) -> Result<Option<EstatesResponse>, ClientError> {
        let id = chair_id.to_string();
        self.get_optional(&["api", "recommended_estate", &id]).await
    }

    async fn search_estates_in_polygon(
        &self,
        coordinates: &Coordinates,
    ) -> Result<EstatesResponse, ClientError> {
        let url = self.endpoint(&["api", "estate", "nazotte"]);
        debug!("POST {} ({} vertices)", url, coordinates.coordinates.len());
        let response = self.http.post(url).json(coordinates).send().await?;
        decode(response).await
    }
}
