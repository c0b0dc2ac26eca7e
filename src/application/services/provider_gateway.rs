//! # Provider Gateway
//!
//! Routes a quote request to its provider and returns the caller-facing
//! result.
//!
//! ```text
//! dispatch(request, debug)
//!   -> registry lookup            (unknown -> InvalidProvider)
//!   -> debug support check        (unsupported -> DebugUnsupported)
//!   -> provider call(s)           (per term or batched)
//!   -> rejection                  -> Upstream (verbatim)
//!   -> debug                      -> Debug (raw records)
//!   -> normalize -> price         -> Priced
//! ```
//!
//! Provider calls run one after another; there is no fan-out and no retry.

use crate::application::error::ApplicationResult;
use crate::application::services::quote_pricing::QuotePricingService;
use crate::domain::entities::{PricedQuote, QuoteRequest};
use crate::domain::value_objects::{ContractTerm, DEFAULT_CONTRACT_TERMS};
use crate::infrastructure::providers::{
    FetchMode, ProviderKind, ProviderRegistry, ProviderReply, ProviderResult, QuoteProvider,
    TermDispatch, UpstreamPayload,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Message returned for an unregistered provider identifier.
pub const INVALID_PROVIDER_MESSAGE: &str = "Invalid Provider";

/// A `{ "message": ..., "data": [] }` notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayNotice {
    /// Human-readable message.
    pub message: String,
    /// Always empty.
    pub data: Vec<Value>,
}

impl GatewayNotice {
    /// Creates a notice with empty data.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: Vec::new(),
        }
    }

    /// Notice for an unknown provider identifier.
    #[must_use]
    pub fn invalid_provider() -> Self {
        Self::new(INVALID_PROVIDER_MESSAGE)
    }

    /// Notice for a debug request to a provider without debug support.
    #[must_use]
    pub fn debug_unsupported(kind: ProviderKind) -> Self {
        Self::new(format!("Debug mode is not supported for {}", kind.name()))
    }
}

/// Caller-facing outcome of a dispatch.
///
/// Serializes to the bare payload (no tag).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GatewayResponse {
    /// The provider identifier is not registered.
    InvalidProvider(GatewayNotice),
    /// Debug was requested from a provider that does not support it.
    DebugUnsupported(GatewayNotice),
    /// The provider's own error payload, or a transport failure message.
    Upstream(UpstreamPayload),
    /// Raw provider records (debug mode).
    Debug(Vec<Value>),
    /// Priced quotes.
    Priced(Vec<PricedQuote>),
}

impl GatewayResponse {
    /// Returns a short label for logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InvalidProvider(_) => "invalid_provider",
            Self::DebugUnsupported(_) => "debug_unsupported",
            Self::Upstream(_) => "upstream",
            Self::Debug(_) => "debug",
            Self::Priced(_) => "priced",
        }
    }

    /// Returns the priced quotes, if this is a priced response.
    #[must_use]
    pub fn priced(&self) -> Option<&[PricedQuote]> {
        match self {
            Self::Priced(quotes) => Some(quotes),
            _ => None,
        }
    }
}

/// Dispatches quote requests to provider adapters.
#[derive(Debug, Clone)]
pub struct ProviderGateway {
    registry: Arc<ProviderRegistry>,
    pricing: QuotePricingService,
    default_terms: Vec<ContractTerm>,
}

impl ProviderGateway {
    /// Creates a gateway requesting [`DEFAULT_CONTRACT_TERMS`] by default.
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>, pricing: QuotePricingService) -> Self {
        Self {
            registry,
            pricing,
            default_terms: DEFAULT_CONTRACT_TERMS.to_vec(),
        }
    }

    /// Sets the terms requested when a request names none.
    #[must_use]
    pub fn with_default_contract_terms(mut self, terms: Vec<ContractTerm>) -> Self {
        self.default_terms = terms;
        self
    }

    /// Returns the provider registry.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Returns the default contract terms.
    #[inline]
    #[must_use]
    pub fn default_contract_terms(&self) -> &[ContractTerm] {
        &self.default_terms
    }

    /// Handles one quote request.
    ///
    /// Unknown providers, unsupported debug requests, upstream rejections
    /// and provider transport failures are answered with a payload, not an
    /// error.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::Provider` if provider data cannot be decoded
    /// - `ApplicationError::Domain` if pricing arithmetic fails
    /// - `ApplicationError::Infrastructure` if persistence fails
    pub async fn dispatch(
        &self,
        request: &QuoteRequest,
        debug: bool,
    ) -> ApplicationResult<GatewayResponse> {
        let Some(entry) = self.registry.get(request.provider()) else {
            warn!(provider = %request.provider(), "unknown provider identifier");
            return Ok(GatewayResponse::InvalidProvider(
                GatewayNotice::invalid_provider(),
            ));
        };

        let kind = entry.kind();
        let mode = FetchMode::from_debug(debug);
        if mode.is_debug() && !kind.supports_debug() {
            return Ok(GatewayResponse::DebugUnsupported(
                GatewayNotice::debug_unsupported(kind),
            ));
        }

        let terms = request.terms_or(&self.default_terms);
        info!(
            request_id = %request.request_id(),
            provider = %request.provider(),
            kind = kind.name(),
            terms = ?terms,
            debug = mode.is_debug(),
            "dispatching quote request"
        );

        let reply = match self
            .fetch(entry.adapter().as_ref(), kind, request, terms, mode)
            .await
        {
            Ok(reply) => reply,
            Err(error) if error.is_transport() => {
                warn!(provider = kind.name(), error = %error, "provider request failed");
                return Ok(GatewayResponse::Upstream(UpstreamPayload::from_message(
                    format!("{} request failed: {}", kind.name(), error),
                )));
            }
            Err(error) => return Err(error.into()),
        };

        let response = match reply {
            ProviderReply::Rejected(payload) => {
                warn!(
                    provider = kind.name(),
                    message = payload.message().unwrap_or_default(),
                    "provider rejected request"
                );
                GatewayResponse::Upstream(payload)
            }
            reply if mode.is_debug() => GatewayResponse::Debug(reply.into_records()?),
            reply => {
                let quotes = kind.normalize(reply.into_quotes()?)?;
                GatewayResponse::Priced(self.pricing.process_quotes(quotes, request).await?)
            }
        };

        debug!(
            request_id = %request.request_id(),
            outcome = response.label(),
            "quote request handled"
        );
        Ok(response)
    }

    async fn fetch(
        &self,
        adapter: &dyn QuoteProvider,
        kind: ProviderKind,
        request: &QuoteRequest,
        terms: &[ContractTerm],
        mode: FetchMode,
    ) -> ProviderResult<ProviderReply> {
        match kind.term_dispatch() {
            TermDispatch::Batched => adapter.fetch_quotes(request, terms, mode).await,
            TermDispatch::PerTerm => {
                let mut merged = ProviderReply::empty(mode);
                for term in terms {
                    debug!(provider = kind.name(), term = %term, "requesting single term");
                    let reply = adapter
                        .fetch_quotes(request, std::slice::from_ref(term), mode)
                        .await?;
                    if reply.is_rejected() {
                        return Ok(reply);
                    }
                    merged = merged.merge(reply)?;
                }
                Ok(merged)
            }
        }
    }
}
