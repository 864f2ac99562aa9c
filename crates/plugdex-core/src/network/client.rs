//! HTTP client wrapper.
//!
//! Thin layer over reqwest with a fixed timeout and user agent. The directory
//! endpoints are a pair of plain JSON GETs; the only failure recovery is the
//! loader's stale-snapshot fallback, so there is no retry layer here.

use crate::config::NetworkConfig;
use crate::error::{PlugdexError, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// HTTP client for the directory endpoints.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(NetworkConfig::REQUEST_TIMEOUT)
    }

    /// Create a new HTTP client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| PlugdexError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e),
            })?;

        Ok(Self { client })
    }

    /// Make a GET request, failing on any non-success status.
    pub async fn get(&self, url: &str) -> Result<Response> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PlugdexError::Network {
                message: format!("GET {} failed: {}", url, e),
                source: Some(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlugdexError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    /// Get a reference to the underlying reqwest client.
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
