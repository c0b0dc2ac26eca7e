//! # Raw Quote
//!
//! A quote record as returned by a provider client.
//!
//! Providers return slightly different shapes. The fields the gateway
//! relies on (`term`, `costs.connection`, `costs.rental`, `product.type`)
//! are typed; everything else is kept verbatim so that debug responses and
//! persisted payloads stay faithful to the upstream data.
//!
//! # Examples
//!
//! ```
//! use provider_gateway::domain::entities::RawQuote;
//! use provider_gateway::domain::value_objects::ContractTerm;
//! use rust_decimal::Decimal;
//!
//! let quote = RawQuote::new(
//!     ContractTerm::new(1).unwrap(),
//!     Decimal::new(100, 0),
//!     Decimal::new(50, 0),
//! )
//! .with_product_type("FTTP");
//!
//! assert_eq!(quote.product_type(), Some("FTTP"));
//! ```

use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{CheckedArithmetic, ContractTerm};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cost components quoted by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteCosts {
    /// One-off connection (installation) cost.
    #[serde(serialize_with = "rust_decimal::serde::str::serialize")]
    pub connection: Decimal,
    /// Annual rental cost.
    #[serde(serialize_with = "rust_decimal::serde::str::serialize")]
    pub rental: Decimal,
    /// Any other cost fields the provider reports.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuoteCosts {
    /// Creates costs with no extra fields.
    #[must_use]
    pub fn new(connection: Decimal, rental: Decimal) -> Self {
        Self {
            connection,
            rental,
            extra: Map::new(),
        }
    }
}

/// Product description attached to a quote.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Access technology, e.g. `FTTP` or `GPON`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Remaining product fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A quote record produced by a provider client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQuote {
    /// Contract term in years.
    term: ContractTerm,
    /// Provider costs.
    costs: QuoteCosts,
    /// Product description, when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    product: Option<ProductInfo>,
    /// Remaining provider fields.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl RawQuote {
    /// Creates a raw quote with the given term and costs.
    #[must_use]
    pub fn new(term: ContractTerm, connection: Decimal, rental: Decimal) -> Self {
        Self {
            term,
            costs: QuoteCosts::new(connection, rental),
            product: None,
            extra: Map::new(),
        }
    }

    /// Sets `product.type`.
    #[must_use]
    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product
            .get_or_insert_with(ProductInfo::default)
            .product_type = Some(product_type.into());
        self
    }

    /// Adds a top-level provider field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
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

    /// Returns `product.type`, if present.
    #[must_use]
    pub fn product_type(&self) -> Option<&str> {
        self.product.as_ref()?.product_type.as_deref()
    }

    /// Returns a top-level provider field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Returns all remaining provider fields.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Returns the quote with its rental multiplied by `factor`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` if the product overflows.
    pub fn scale_rental(mut self, factor: Decimal) -> DomainResult<Self> {
        self.costs.rental = self.costs.rental.safe_mul(factor)?;
        Ok(self)
    }

    /// Splits the quote into its parts.
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        ContractTerm,
        QuoteCosts,
        Option<ProductInfo>,
        Map<String, Value>,
    ) {
        (self.term, self.costs, self.product, self.extra)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cityfibre_payload() -> Value {
        json!({
            "term": 3,
            "costs": {"connection": 250.5, "rental": 40, "currency": "GBP"},
            "product": {"type": "FTTP", "bandwidth": 1000},
            "reference": "CF-123"
        })
    }

    #[test]
    fn deserializes_provider_payload() {
        let quote: RawQuote = serde_json::from_value(cityfibre_payload()).unwrap();

        assert_eq!(quote.term().years(), 3);
        assert_eq!(quote.costs().connection, Decimal::new(2505, 1));
        assert_eq!(quote.costs().rental, Decimal::new(40, 0));
        assert_eq!(quote.product_type(), Some("FTTP"));
        assert_eq!(quote.field("reference"), Some(&json!("CF-123")));
    }

    #[test]
    fn serialization_keeps_unknown_fields_and_exact_amounts() {
        let quote: RawQuote = serde_json::from_value(cityfibre_payload()).unwrap();
        let value = serde_json::to_value(&quote).unwrap();

        assert_eq!(value["costs"]["currency"], json!("GBP"));
        assert_eq!(value["product"]["bandwidth"], json!(1000));
        assert_eq!(value["costs"]["connection"], json!("250.5"));
        assert_eq!(value["costs"]["rental"], json!("40"));
    }

    #[test]
    fn high_precision_amounts_survive_persistence_form() {
        let quote: RawQuote = serde_json::from_value(json!({
            "term": 1,
            "costs": {"connection": "1234567890.123456789012", "rental": "0.1"}
        }))
        .unwrap();
        let value = serde_json::to_value(&quote).unwrap();
        assert_eq!(value["costs"]["connection"], json!("1234567890.123456789012"));

        let reloaded: RawQuote = serde_json::from_value(value).unwrap();
        assert_eq!(reloaded.costs(), quote.costs());
    }

    #[test]
    fn accepts_string_amounts() {
        let quote: RawQuote = serde_json::from_value(json!({
            "term": 1,
            "costs": {"connection": "10.25", "rental": "5"}
        }))
        .unwrap();
        assert_eq!(quote.costs().connection, Decimal::new(1025, 2));
        assert!(quote.product().is_none());
    }

    #[test]
    fn missing_costs_fail_to_decode() {
        let result: Result<RawQuote, _> = serde_json::from_value(json!({"term": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn scale_rental_multiplies() {
        let quote = RawQuote::new(
            ContractTerm::new(1).unwrap(),
            Decimal::new(100, 0),
            Decimal::new(25, 0),
        )
        .scale_rental(Decimal::new(12, 0))
        .unwrap();
        assert_eq!(quote.costs().rental, Decimal::new(300, 0));
        assert_eq!(quote.costs().connection, Decimal::new(100, 0));
    }
}
