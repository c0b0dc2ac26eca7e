//! # HTTP Client Utilities
//!
//! Shared HTTP client for provider adapters.
//!
//! Wraps `reqwest` with a fixed timeout and maps transport and status
//! failures to [`ProviderError`]. Error statuses whose body is an upstream
//! `error` / `message` object are handed back as a body so the caller can
//! pass the rejection through.

use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::UpstreamPayload;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// HTTP client wrapper for provider adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ProviderError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// POSTs `body` as JSON and returns the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Timeout` or `ProviderError::Connection` if the
    /// request fails, a status-derived error for non-2xx responses without
    /// an upstream payload, and `ProviderError::Protocol` if the body is not
    /// JSON.
    pub async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> ProviderResult<Value> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and parsing JSON.
    async fn handle_response(&self, response: Response) -> ProviderResult<Value> {
        let status = response.status();

        if status.is_success() {
            return response
                .json::<Value>()
                .await
                .map_err(|e| ProviderError::protocol(format!("Failed to parse response: {}", e)));
        }

        let error_body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<Value>(&error_body) {
            Ok(Value::Object(fields)) if UpstreamPayload::is_rejection(&fields) => {
                Ok(Value::Object(fields))
            }
            _ => Err(self.map_status_error(status, &error_body)),
        }
    }

    /// Maps a reqwest error to a ProviderError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::timeout_with_duration("Request timed out", self.timeout_ms)
        } else if error.is_connect() {
            ProviderError::connection(format!("Connection failed: {}", error))
        } else {
            ProviderError::connection(format!("HTTP request failed: {}", error))
        }
    }

    /// Maps an HTTP status code to a ProviderError.
    fn map_status_error(&self, status: StatusCode, body: &str) -> ProviderError {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ProviderError::invalid_request(format!("Bad request: {}", body))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::authentication(format!("Authentication failed: {}", body))
            }
            StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited("Rate limit exceeded"),
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => {
                ProviderError::connection(format!("Server error ({}): {}", status, body))
            }
            _ => ProviderError::protocol(format!("HTTP error ({}): {}", status, body)),
        }
    }
}
