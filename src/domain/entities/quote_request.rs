//! # Quote Request
//!
//! Normalized request for provider quotes.
//!
//! A request names its provider, optionally the contract terms to quote,
//! and carries provider-specific details (address, product, bandwidth, ...)
//! that are forwarded to the provider client untouched.
//!
//! # Examples
//!
//! ```
//! use provider_gateway::domain::entities::QuoteRequest;
//! use provider_gateway::domain::value_objects::{ContractTerm, ProviderId, RequestId};
//!
//! let request = QuoteRequest::new(RequestId::new("req-1"), ProviderId::new("neos"))
//!     .with_detail("postcode", "SW1A 1AA");
//!
//! let defaults = ContractTerm::from_years(&[1, 3]).unwrap();
//! assert_eq!(request.terms_or(&defaults).len(), 2);
//! ```

use crate::domain::value_objects::{ContractTerm, ProviderId, RequestId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A quote request as received from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Identifier of the originating request.
    request_id: RequestId,
    /// Provider identifier, resolved against the registry.
    provider: ProviderId,
    /// Requested contract terms; `None` means the configured defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contract_term: Option<Vec<ContractTerm>>,
    /// Provider-specific fields.
    #[serde(flatten)]
    details: Map<String, Value>,
}

impl QuoteRequest {
    /// Creates a request without explicit terms or details.
    #[must_use]
    pub fn new(request_id: RequestId, provider: ProviderId) -> Self {
        Self {
            request_id,
            provider,
            contract_term: None,
            details: Map::new(),
        }
    }

    /// Sets the requested contract terms.
    #[must_use]
    pub fn with_contract_terms(mut self, terms: Vec<ContractTerm>) -> Self {
        self.contract_term = Some(terms);
        self
    }

    /// Adds a provider-specific detail.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the request identifier.
    #[inline]
    #[must_use]
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Returns the provider identifier.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Returns the explicitly requested terms, if any.
    #[must_use]
    pub fn contract_terms(&self) -> Option<&[ContractTerm]> {
        self.contract_term.as_deref()
    }

    /// Returns the requested terms, or `defaults` when none were given.
    #[must_use]
    pub fn terms_or<'a>(&'a self, defaults: &'a [ContractTerm]) -> &'a [ContractTerm] {
        self.contract_terms().unwrap_or(defaults)
    }

    /// Returns a provider-specific detail.
    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    /// Returns all provider-specific details.
    #[must_use]
    pub fn details(&self) -> &Map<String, Value> {
        &self.details
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_with_details() {
        let request: QuoteRequest = serde_json::from_value(json!({
            "request_id": "req-9",
            "provider": "abc",
            "contract_term": [1, 2, 3],
            "postcode": "M1 1AA",
            "bandwidth": 100
        }))
        .unwrap();

        assert_eq!(request.request_id().as_str(), "req-9");
        assert_eq!(request.provider().as_str(), "abc");
        assert_eq!(request.contract_terms().map(<[_]>::len), Some(3));
        assert_eq!(request.detail("postcode"), Some(&json!("M1 1AA")));
        assert_eq!(request.details().len(), 2);
    }

    #[test]
    fn missing_terms_fall_back_to_defaults() {
        let request: QuoteRequest =
            serde_json::from_value(json!({"request_id": "r", "provider": "p"})).unwrap();
        let defaults = ContractTerm::from_years(&[1, 3]).unwrap();

        assert!(request.contract_terms().is_none());
        assert_eq!(request.terms_or(&defaults), defaults.as_slice());
    }

    #[test]
    fn invalid_term_is_rejected() {
        let result: Result<QuoteRequest, _> = serde_json::from_value(json!({
            "request_id": "r",
            "provider": "p",
            "contract_term": [0]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_details_inline() {
        let request = QuoteRequest::new(RequestId::new("r"), ProviderId::new("p"))
            .with_detail("postcode", "E1 6AN");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["postcode"], json!("E1 6AN"));
        assert!(value.get("contract_term").is_none());
    }
}
