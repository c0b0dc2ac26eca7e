//! # Stored Quote
//!
//! The persisted form of a raw quote.
//!
//! Persistence assigns an id and links the quote to its request and
//! provider. Pricing always works on this representation, never on the raw
//! provider output.

use crate::domain::entities::quote_request::QuoteRequest;
use crate::domain::entities::raw_quote::{ProductInfo, QuoteCosts, RawQuote};
use crate::domain::value_objects::{ContractTerm, ProviderId, QuoteId, RequestId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level keys owned by the stored representation.
///
/// Provider fields with these names are dropped so the typed values are the
/// only ones serialized.
pub const STORED_QUOTE_KEYS: [&str; 4] = ["id", "request_id", "provider", "created_at"];

/// A quote as returned by the quote repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredQuote {
    /// Persistence identifier.
    id: QuoteId,
    /// Originating request.
    request_id: RequestId,
    /// Provider that produced the quote.
    provider: ProviderId,
    /// Contract term in years.
    term: ContractTerm,
    /// Provider costs.
    costs: QuoteCosts,
    /// Product description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    product: Option<ProductInfo>,
    /// Remaining provider fields.
    #[serde(flatten)]
    extra: Map<String, Value>,
    /// When the quote was stored.
    created_at: Timestamp,
}

impl StoredQuote {
    /// Builds the stored form of `raw` for `request` with a fresh id.
    #[must_use]
    pub fn from_raw(raw: RawQuote, request: &QuoteRequest) -> Self {
        Self::from_raw_with_id(QuoteId::new_v4(), raw, request, Timestamp::now())
    }

    /// Builds the stored form of `raw` with an explicit id and timestamp.
    #[must_use]
    pub fn from_raw_with_id(
        id: QuoteId,
        raw: RawQuote,
        request: &QuoteRequest,
        created_at: Timestamp,
    ) -> Self {
        Self::from_parts(
            id,
            request.request_id().clone(),
            request.provider().clone(),
            raw,
            created_at,
        )
    }

    /// Reconstructs a stored quote from its parts (for loading from storage).
    #[must_use]
    pub fn from_parts(
        id: QuoteId,
        request_id: RequestId,
        provider: ProviderId,
        raw: RawQuote,
        created_at: Timestamp,
    ) -> Self {
        let (term, costs, product, mut extra) = raw.into_parts();
        for key in STORED_QUOTE_KEYS {
            extra.remove(key);
        }
        Self {
            id,
            request_id,
            provider,
            term,
            costs,
            product,
            extra,
            created_at,
        }
    }

    /// Returns the quote id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> QuoteId {
        self.id
    }

    /// Returns the originating request id.
    #[inline]
    #[must_use]
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Returns the provider id.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Returns the contract term.
    #[inline]
    #[must_use]
    pub fn term(&self) -> ContractTerm {
        self.term
    }

    /// Returns the costs.
    #[inline]
    #[must_use]
    pub fn costs(&self) -> &QuoteCosts {
        &self.costs
    }

    /// Returns the product description.
    #[inline]
    #[must_use]
    pub fn product(&self) -> Option<&ProductInfo> {
        self.product.as_ref()
    }

    /// Returns the remaining provider fields.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Returns when the quote was stored.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn request() -> QuoteRequest {
        QuoteRequest::new(RequestId::new("req-1"), ProviderId::new("sky"))
    }

    #[test]
    fn from_raw_links_request_and_provider() {
        let raw = RawQuote::new(
            ContractTerm::new(2).unwrap(),
            Decimal::new(10, 0),
            Decimal::new(20, 0),
        )
        .with_field("reference", "Q-1");

        let stored = StoredQuote::from_raw(raw, &request());

        assert_eq!(stored.request_id().as_str(), "req-1");
        assert_eq!(stored.provider().as_str(), "sky");
        assert_eq!(stored.term().years(), 2);
        assert_eq!(stored.costs().rental, Decimal::new(20, 0));
        assert!(stored.extra().contains_key("reference"));
    }

    #[test]
    fn from_parts_uses_given_identity() {
        let id = QuoteId::new_v4();
        let created_at = Timestamp::from_millis(1_000).unwrap();
        let raw = RawQuote::new(
            ContractTerm::new(1).unwrap(),
            Decimal::new(1, 0),
            Decimal::new(2, 0),
        )
        .with_product_type("FTTC");

        let stored = StoredQuote::from_parts(
            id,
            RequestId::new("req-2"),
            ProviderId::new("bt"),
            raw,
            created_at,
        );

        assert_eq!(stored.id(), id);
        assert_eq!(stored.created_at(), created_at);
        assert_eq!(
            stored.product().and_then(|p| p.product_type.as_deref()),
            Some("FTTC")
        );
    }

    #[test]
    fn provider_fields_cannot_shadow_identity() {
        let raw: RawQuote = serde_json::from_value(serde_json::json!({
            "id": "UPSTREAM-1",
            "request_id": "other",
            "provider": "other",
            "created_at": "yesterday",
            "term": 1,
            "costs": {"connection": 1, "rental": 2},
            "reference": "R-1"
        }))
        .unwrap();

        let stored = StoredQuote::from_raw(raw, &request());
        let text = serde_json::to_string(&stored).unwrap();
        assert_eq!(text.matches("\"id\"").count(), 1);
        assert_eq!(text.matches("\"provider\"").count(), 1);

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["id"], serde_json::json!(stored.id().get().to_string()));
        assert_eq!(value["request_id"], "req-1");
        assert_eq!(value["provider"], "sky");
        assert_eq!(value["reference"], "R-1");
    }
}
