//! Backend client
//!
//! Talks to the request service that fronts Sonarr and Radarr.
//! Two endpoints, no auth, no retries.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{MediaType, RequestPayload, RequestReply, SearchResponse};

/// Default backend address (the service listens on 5505)
pub const DEFAULT_BASE_URL: &str = "http://localhost:5505";

/// Backend error types
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid response ({status}): {reason}")]
    InvalidResponse { status: u16, reason: String },
}

/// Backend API client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for BackendClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl BackendClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client with a custom per-call timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search one catalogue for `query`, returning the requested page
    pub async fn search(
        &self,
        query: &str,
        media_type: MediaType,
        page: u32,
    ) -> Result<SearchResponse, BackendError> {
        let url = format!(
            "{}/search?query={}&type={}&page={}",
            self.base_url,
            urlencoding::encode(query),
            media_type.as_str(),
            page
        );
        debug!(%url, "searching");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Submit a request for a movie or show
    pub async fn request(&self, payload: &RequestPayload) -> Result<RequestReply, BackendError> {
        let url = format!("{}/request", self.base_url);
        debug!(%url, id = %payload.id, media_type = payload.media_type.as_str(), "requesting");

        // reqwest's .json() sets Content-Type: application/json
        let response = self.client.post(&url).json(payload).send().await?;

        Self::decode(response).await
    }

    /// Decode a JSON body whatever the status.
    ///
    /// The backend answers 400/500 with `{"error": ...}` bodies, which are
    /// application errors for the caller to show, not transport failures.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "backend returned non-200");
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| BackendError::InvalidResponse {
            status: status.as_u16(),
            reason: format!("JSON parse error: {}", e),
        })
    }
}
