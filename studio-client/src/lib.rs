//! Studio HTTP Client
//!
//! A type-safe HTTP client for the content generation backend: sermon and
//! Bible-message drafting, product detail-page copy and images, translation,
//! and short-drama video rendering.
//!
//! Every response body is decoded once, here, into the typed values from
//! `studio-core`. Bodies that are not JSON surface as [`ClientError::NonJson`].
//!
//! # Example
//!
//! ```no_run
//! use studio_client::StudioClient;
//! use studio_core::dto::content::TranslateRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = StudioClient::new("http://localhost:3000");
//!
//!     let translation = client.translate(&TranslateRequest {
//!         text: "In the beginning".to_string(),
//!         target_language: "ko".to_string(),
//!     }).await?;
//!
//!     println!("{}", translation.translation);
//!     Ok(())
//! }
//! ```

mod content;
pub mod error;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use jobs::JobApi;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP client for the generation backend
#[derive(Debug, Clone)]
pub struct StudioClient {
    /// Base URL of the backend (e.g., "http://localhost:3000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl StudioClient {
    /// Create a new client
    ///
    /// # Example
    /// ```
    /// use studio_client::StudioClient;
    ///
    /// let client = StudioClient::new("http://localhost:3000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use studio_client::StudioClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = StudioClient::with_client("http://localhost:3000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Read a response body and decode it as JSON, whatever the status code
    async fn read_json(&self, response: reqwest::Response) -> Result<(StatusCode, Value)> {
        let status = response.status();
        let body = response.text().await?;
        let value = parse_body(status, &body)?;
        Ok((status, value))
    }

    /// Handle a `{ ok, error?, ... }` envelope response and deserialize it
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let (status, value) = self.read_json(response).await?;
        decode_envelope(status, value)
    }
}

/// Parses a body as JSON, mapping anything else to [`ClientError::NonJson`]
pub(crate) fn parse_body(status: StatusCode, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|_| ClientError::non_json(status.as_u16(), body))
}

/// Unwraps the `{ ok, error? }` envelope shared by the generation endpoints
pub(crate) fn decode_envelope<T: DeserializeOwned>(status: StatusCode, value: Value) -> Result<T> {
    if value.get("ok").and_then(Value::as_bool) == Some(false) {
        let message = value
            .get("error")
            .or_else(|| value.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("request rejected")
            .to_string();
        return Err(ClientError::Rejected(message));
    }

    if !status.is_success() {
        return Err(ClientError::api_error(status.as_u16(), value.to_string()));
    }

    serde_json::from_value(value)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}
