//! # Markup Pricing
//!
//! Pure functions turning provider quotes into sell prices.
//!
//! - [`filter_by_term_ceiling`]: drops quotes whose term is not yet offered
//! - [`sell_price`]: applies one term's markup to a cost pair
//! - [`apply_markup`]: prices a list of stored quotes against a rule
//!
//! # Examples
//!
//! ```
//! use provider_gateway::domain::entities::{
//!     AdjustmentKind, CostComponent, MarkupRule, QuoteRequest, RawQuote, StoredQuote,
//! };
//! use provider_gateway::domain::services::markup_pricing::apply_markup;
//! use provider_gateway::domain::value_objects::{ContractTerm, ProviderId, RequestId, UserType};
//! use rust_decimal::Decimal;
//!
//! let term = ContractTerm::new(1).unwrap();
//! let request = QuoteRequest::new(RequestId::new("r"), ProviderId::new("neos"));
//! let stored = StoredQuote::from_raw(
//!     RawQuote::new(term, Decimal::new(100, 0), Decimal::new(50, 0)),
//!     &request,
//! );
//! let rule = MarkupRule::new(UserType::new(3), ProviderId::new("neos"))
//!     .with_adjustment(term, CostComponent::Connection, AdjustmentKind::Addition, Decimal::new(10, 0));
//!
//! let priced = apply_markup(&[stored], Some(&rule)).unwrap();
//! assert_eq!(priced[0].sell().connection, "110.00");
//! assert_eq!(priced[0].sell().rental, "50.00");
//! ```

use crate::domain::entities::{
    MarkupRule, PricedQuote, QuoteCosts, RawQuote, SellPrice, StoredQuote, TermMarkup,
};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::ContractTerm;

/// Keeps quotes whose term does not exceed `ceiling`, in order.
///
/// Applying the filter twice yields the same list as applying it once.
#[must_use]
pub fn filter_by_term_ceiling(quotes: Vec<RawQuote>, ceiling: ContractTerm) -> Vec<RawQuote> {
    quotes
        .into_iter()
        .filter(|quote| quote.term().is_within(ceiling))
        .collect()
}

/// Computes the sell prices for `costs` under one term's markup.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` on overflow.
pub fn sell_price(costs: &QuoteCosts, markup: &TermMarkup) -> DomainResult<SellPrice> {
    let connection = markup.connection.apply(costs.connection)?;
    let rental = markup.rental.apply(costs.rental)?;
    Ok(SellPrice::from_amounts(connection, rental))
}

/// Prices `quotes` against `rule`.
///
/// Quotes whose term has no markup values are dropped; the rest keep their
/// relative order. Without a rule nothing is priced and the result is empty.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` if any sell price overflows.
pub fn apply_markup(
    quotes: &[StoredQuote],
    rule: Option<&MarkupRule>,
) -> DomainResult<Vec<PricedQuote>> {
    let Some(rule) = rule else {
        return Ok(Vec::new());
    };

    quotes
        .iter()
        .filter_map(|quote| {
            rule.term_markup(quote.term())
                .map(|markup| (quote, markup))
        })
        .map(|(quote, markup)| {
            let sell = sell_price(quote.costs(), markup)?;
            Ok(PricedQuote::from_stored(quote, sell, rule.user_type()))
        })
        .collect()
}
