//! # HTTP Quote Provider
//!
//! [`QuoteProvider`] adapter for a provider quoting API reachable over HTTP.
//!
//! Each call POSTs
//!
//! ```json
//! { "request": { ... }, "contract_term": [1, 3], "debug": false }
//! ```
//!
//! to the configured endpoint. The response is either a JSON array of quote
//! records or an object carrying `error` / `message`.

use crate::domain::entities::QuoteRequest;
use crate::domain::value_objects::ContractTerm;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::http_client::HttpClient;
use crate::infrastructure::providers::kind::ProviderKind;
use crate::infrastructure::providers::traits::{FetchMode, ProviderReply, QuoteProvider};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

/// Body sent to a provider quoting API.
#[derive(Debug, Serialize)]
struct FetchBody<'a> {
    request: &'a QuoteRequest,
    contract_term: &'a [ContractTerm],
    debug: bool,
}

/// Provider adapter backed by an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpQuoteProvider {
    kind: ProviderKind,
    endpoint: String,
    client: HttpClient,
}

impl HttpQuoteProvider {
    /// Creates an adapter for `kind` posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` if the endpoint is blank, or
    /// `ProviderError::Internal` if the HTTP client cannot be built.
    pub fn new(kind: ProviderKind, endpoint: impl Into<String>, timeout_ms: u64) -> ProviderResult<Self> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ProviderError::configuration(format!(
                "{} endpoint must not be empty",
                kind.name()
            )));
        }

        Ok(Self {
            kind,
            endpoint,
            client: HttpClient::new(timeout_ms)?,
        })
    }

    /// Returns the endpoint URL.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QuoteProvider for HttpQuoteProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn fetch_quotes(
        &self,
        request: &QuoteRequest,
        terms: &[ContractTerm],
        mode: FetchMode,
    ) -> ProviderResult<ProviderReply> {
        debug!(
            provider = self.kind.name(),
            request_id = %request.request_id(),
            terms = ?terms,
            debug = mode.is_debug(),
            "requesting provider quotes"
        );

        let body = FetchBody {
            request,
            contract_term: terms,
            debug: mode.is_debug(),
        };
        let response = self.client.post_json(&self.endpoint, &body).await?;
        let reply = ProviderReply::from_body(response, mode)?;

        debug!(
            provider = self.kind.name(),
            records = reply.len(),
            rejected = reply.is_rejected(),
            "provider replied"
        );
        Ok(reply)
    }
}
