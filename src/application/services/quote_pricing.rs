//! # Quote Pricing
//!
//! Turns normalized provider quotes into priced quotes:
//!
//! 1. drop quotes above the term ceiling
//! 2. persist the rest against the request
//! 3. resolve the markup rule for the request
//! 4. apply markup to the stored quotes

use crate::application::error::ApplicationResult;
use crate::application::services::markup_resolver::MarkupResolver;
use crate::domain::entities::{PricedQuote, QuoteRequest, RawQuote};
use crate::domain::services::markup_pricing::{apply_markup, filter_by_term_ceiling};
use crate::domain::value_objects::{ContractTerm, DEFAULT_CONTRACT_TERMS, DEFAULT_TERM_CEILING};
use crate::infrastructure::persistence::QuoteRepository;
use std::sync::Arc;
use tracing::debug;

/// Pricing settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Longest contract term offered.
    pub term_ceiling: ContractTerm,
    /// Terms requested when a request names none.
    pub default_contract_terms: Vec<ContractTerm>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            term_ceiling: DEFAULT_TERM_CEILING,
            default_contract_terms: DEFAULT_CONTRACT_TERMS.to_vec(),
        }
    }
}

impl PricingPolicy {
    /// Sets the term ceiling.
    #[must_use]
    pub fn with_term_ceiling(mut self, term_ceiling: ContractTerm) -> Self {
        self.term_ceiling = term_ceiling;
        self
    }

    /// Sets the default contract terms.
    #[must_use]
    pub fn with_default_contract_terms(mut self, terms: Vec<ContractTerm>) -> Self {
        self.default_contract_terms = terms;
        self
    }
}

/// Filters, persists and prices provider quotes.
#[derive(Debug, Clone)]
pub struct QuotePricingService {
    quotes: Arc<dyn QuoteRepository>,
    resolver: MarkupResolver,
    term_ceiling: ContractTerm,
}

impl QuotePricingService {
    /// Creates a pricing service.
    #[must_use]
    pub fn new(
        quotes: Arc<dyn QuoteRepository>,
        resolver: MarkupResolver,
        term_ceiling: ContractTerm,
    ) -> Self {
        Self {
            quotes,
            resolver,
            term_ceiling,
        }
    }

    /// Returns the term ceiling.
    #[inline]
    #[must_use]
    pub fn term_ceiling(&self) -> ContractTerm {
        self.term_ceiling
    }

    /// Prices `raw_quotes` for `request`.
    ///
    /// The result keeps input order and contains only quotes whose term has
    /// markup values in the resolved rule.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::Infrastructure` if persistence or lookup fails
    /// - `ApplicationError::Domain` if markup arithmetic overflows
    pub async fn process_quotes(
        &self,
        raw_quotes: Vec<RawQuote>,
        request: &QuoteRequest,
    ) -> ApplicationResult<Vec<PricedQuote>> {
        let received = raw_quotes.len();
        let offered = filter_by_term_ceiling(raw_quotes, self.term_ceiling);

        let stored = self.quotes.create_quotes(&offered, request).await?;
        let rule = self.resolver.resolve(request).await?;
        let priced = apply_markup(&stored, rule.as_ref())?;

        debug!(
            request_id = %request.request_id(),
            received,
            stored = stored.len(),
            priced = priced.len(),
            "quotes priced"
        );
        Ok(priced)
    }
}
