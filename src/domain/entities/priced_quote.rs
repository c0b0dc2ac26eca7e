//! # Priced Quote
//!
//! A stored quote after markup has been applied.
//!
//! The provider's `costs.connection` and `costs.rental` are replaced by
//! `costs.sell = { connection, rental }`, both rendered with two decimals,
//! and the quote is stamped with the user type of the markup rule used.

use crate::domain::entities::raw_quote::ProductInfo;
use crate::domain::entities::stored_quote::StoredQuote;
use crate::domain::value_objects::{
    ContractTerm, ProviderId, QuoteId, RequestId, Timestamp, UserType, format_fixed,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decimal places of rendered sell prices.
pub const SELL_PRICE_DECIMALS: u32 = 2;

/// Key of the stamped user type; a provider field of this name is dropped.
pub const USER_TYPE_KEY: &str = "user_type";

/// Key of the sell prices inside `costs`; a provider cost of this name is dropped.
pub const SELL_KEY: &str = "sell";

/// Customer-facing sell prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellPrice {
    /// Sell connection price, e.g. `"121.00"`.
    pub connection: String,
    /// Sell rental price, e.g. `"66.00"`.
    pub rental: String,
}

impl SellPrice {
    /// Renders computed sell amounts.
    #[must_use]
    pub fn from_amounts(connection: Decimal, rental: Decimal) -> Self {
        Self {
            connection: format_fixed(connection, SELL_PRICE_DECIMALS),
            rental: format_fixed(rental, SELL_PRICE_DECIMALS),
        }
    }
}

/// Costs of a priced quote: sell prices plus any extra provider cost fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedCosts {
    /// Sell prices.
    pub sell: SellPrice,
    /// Provider cost fields other than connection and rental.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A quote ready to be returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedQuote {
    /// Persistence identifier.
    id: QuoteId,
    /// Originating request.
    request_id: RequestId,
    /// Provider that produced the quote.
    provider: ProviderId,
    /// Contract term in years.
    term: ContractTerm,
    /// Sell prices.
    costs: PricedCosts,
    /// Product description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    product: Option<ProductInfo>,
    /// User type of the markup rule applied.
    user_type: UserType,
    /// Remaining provider fields.
    #[serde(flatten)]
    extra: Map<String, Value>,
    /// When the underlying quote was stored.
    created_at: Timestamp,
}

impl PricedQuote {
    /// Replaces the costs of `stored` with `sell` and stamps `user_type`.
    #[must_use]
    pub fn from_stored(stored: &StoredQuote, sell: SellPrice, user_type: UserType) -> Self {
        let mut costs_extra = stored.costs().extra.clone();
        costs_extra.remove(SELL_KEY);
        let mut extra = stored.extra().clone();
        extra.remove(USER_TYPE_KEY);

        Self {
            id: stored.id(),
            request_id: stored.request_id().clone(),
            provider: stored.provider().clone(),
            term: stored.term(),
            costs: PricedCosts {
                sell,
                extra: costs_extra,
            },
            product: stored.product().cloned(),
            user_type,
            extra,
            created_at: stored.created_at(),
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

    /// Returns the sell prices.
    #[inline]
    #[must_use]
    pub fn sell(&self) -> &SellPrice {
        &self.costs.sell
    }

    /// Returns the priced costs.
    #[inline]
    #[must_use]
    pub fn costs(&self) -> &PricedCosts {
        &self.costs
    }

    /// Returns the product description.
    #[inline]
    #[must_use]
    pub fn product(&self) -> Option<&ProductInfo> {
        self.product.as_ref()
    }

    /// Returns the user type stamped on the quote.
    #[inline]
    #[must_use]
    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    /// Returns the remaining provider fields.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}
