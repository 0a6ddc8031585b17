pub mod endpoints;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{FetchError, Result};
use crate::types::InfoRequest;

/// HTTP client wrapper for the Hyperliquid `/info` endpoint.
#[derive(Debug, Clone)]
pub struct InfoHttpClient {
    client: Client,
    info_url: String,
}

impl InfoHttpClient {
    /// Build a client whose every request is bounded by `timeout`.
    pub fn new(info_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            info_url: info_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST an info request and decode the JSON answer.
    ///
    /// A top-level `error` key in the answer is reported as
    /// [`FetchError::Api`] before the body is decoded into `T`.
    pub async fn post_info<T: DeserializeOwned>(&self, request: &InfoRequest) -> Result<T> {
        let resp = self
            .client
            .post(&self.info_url)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "info response");

        if !status.is_success() {
            return Err(FetchError::Api(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let value: Value = serde_json::from_str(&body)?;
        if let Some(err) = value.get("error") {
            let message = match err {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Err(FetchError::Api(message));
        }

        serde_json::from_value(value).map_err(FetchError::Malformed)
    }

    /// Get the endpoint URL.
    pub fn info_url(&self) -> &str {
        &self.info_url
    }
}
