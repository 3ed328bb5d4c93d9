// src/services/backend.rs
use reqwest::{Client, Url};
use tracing::debug;

use crate::{
    config::ClientConfig,
    error::BackendError,
    message::{ChatRequest, ChatResponse, HealthStatus, ProgressReport},
};

/// HTTP client for the copilot backend. Every call is a single attempt
/// bounded by the configured request timeout.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    endpoint: Url,
    base: Url,
}

impl BackendClient {
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            base: base_url(&config.endpoint),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST the message as JSON and decode the JSON answer. Non-2xx
    /// statuses count as failures.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError> {
        debug!(endpoint = %self.endpoint, "sending message to backend");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<ChatResponse>().await?)
    }

    pub async fn health(&self) -> Result<HealthStatus, BackendError> {
        let url = self.api_url(&["health"])?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json::<HealthStatus>().await?)
    }

    pub async fn progress(&self, user_id: &str) -> Result<ProgressReport, BackendError> {
        let url = self.api_url(&["progress", user_id])?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json::<ProgressReport>().await?)
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }
}

// The chat endpoint lives under `/api/...`; sibling routes hang off the root.
fn base_url(endpoint: &Url) -> Url {
    let mut base = endpoint.clone();
    base.set_path("/");
    base.set_query(None);
    base.set_fragment(None);
    base
}
