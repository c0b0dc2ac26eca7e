//! # Domain Entities
//!
//! ## Quotes
//!
//! - [`QuoteRequest`]: caller request routed to one provider
//! - [`RawQuote`]: quote record as returned by a provider
//! - [`StoredQuote`]: persisted quote, input to pricing
//! - [`PricedQuote`]: quote with sell prices, returned to callers
//!
//! ## Pricing
//!
//! - [`MarkupRule`]: per-term adjustments for a user type and provider
//!
//! ## Providers
//!
//! - [`ProviderRecord`], [`ProviderCupid`]: provider listing metadata
//! - [`RequestContext`]: persisted request context (quote type)

pub mod markup;
pub mod priced_quote;
pub mod provider;
pub mod quote_request;
pub mod raw_quote;
pub mod request_context;
pub mod stored_quote;

pub use markup::{
    AdjustmentKind, ComponentAdjustment, CostComponent, MarkupField, MarkupRule, TermMarkup,
};
pub use priced_quote::{
    PricedCosts, PricedQuote, SELL_KEY, SELL_PRICE_DECIMALS, SellPrice, USER_TYPE_KEY,
};
pub use provider::{ProviderCupid, ProviderRecord};
pub use quote_request::QuoteRequest;
pub use raw_quote::{ProductInfo, QuoteCosts, RawQuote};
pub use request_context::RequestContext;
pub use stored_quote::{STORED_QUOTE_KEYS, StoredQuote};
