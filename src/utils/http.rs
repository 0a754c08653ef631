//! HTTP utilities for calling the upstream news API

use crate::error::{NewsError, NewsResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Upstream calls are bounded by this and never retried
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const USER_AGENT: &str = concat!("gnews-fetcher/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper with a fixed per-request timeout
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout_ms: u64) -> NewsResult<Self> {
        let timeout = Duration::from_millis(timeout_ms);
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| NewsError::upstream(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    /// Make a GET request with query parameters and deserialize the JSON response
    pub async fn get_json<T>(&self, url: &str, params: &[(&str, String)]) -> NewsResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .query(params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        self.handle_response_json(response).await
    }

    /// Handle HTTP response and deserialize as JSON
    async fn handle_response_json<T>(&self, response: Response) -> NewsResult<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await.map_err(|e| self.classify(e))?;
            Ok(serde_json::from_str(&text)?)
        } else {
            let status_code = status.as_u16();
            let response_body = response.text().await.ok();

            Err(NewsError::Upstream {
                message: format!("Request failed with status: {status}"),
                status_code: Some(status_code),
                response_body,
            })
        }
    }

    /// Timeouts carry the configured bound; everything else is an upstream
    /// failure. The URL is dropped so the token never reaches a message.
    fn classify(&self, error: reqwest::Error) -> NewsError {
        let error = error.without_url();
        if error.is_timeout() {
            NewsError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            NewsError::from(error)
        }
    }
}

/// Build a URL with query parameters
pub fn build_url(base_url: &str, params: &[(&str, String)]) -> NewsResult<String> {
    let mut url = Url::parse(base_url)?;

    for (key, value) in params {
        url.query_pairs_mut().append_pair(key, value);
    }

    Ok(url.to_string())
}
