//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! # Available Repositories
//!
//! - [`QuoteRepository`]: persisted quotes keyed to their request
//! - [`MarkupRepository`]: markup rules by `(user_type, supplier_id)`
//! - [`ProviderRepository`]: provider records for listing
//! - [`ProviderCupidsRepository`]: provider CUPID pairings
//! - [`RequestContextRepository`]: stored request context (quote type)

use crate::domain::entities::{
    MarkupRule, ProviderCupid, ProviderRecord, QuoteRequest, RawQuote, RequestContext,
    StoredQuote,
};
use crate::domain::value_objects::{ProviderId, RequestId, UserType};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for computed quotes.
#[async_trait]
pub trait QuoteRepository: Send + Sync + fmt::Debug {
    /// Persists `quotes` for `request` and returns the stored records in
    /// input order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails; no quote of the batch
    /// is kept in that case.
    async fn create_quotes(
        &self,
        quotes: &[RawQuote],
        request: &QuoteRequest,
    ) -> RepositoryResult<Vec<StoredQuote>>;

    /// Returns the quotes stored for a request, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn find_by_request(&self, request_id: &RequestId) -> RepositoryResult<Vec<StoredQuote>>;

    /// Returns the number of stored quotes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn count(&self) -> RepositoryResult<u64>;
}

/// Read access to markup rules.
#[async_trait]
pub trait MarkupRepository: Send + Sync + fmt::Debug {
    /// Returns the rule for `(user_type, supplier_id)`, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn get_markup(
        &self,
        user_type: UserType,
        supplier_id: &ProviderId,
    ) -> RepositoryResult<Option<MarkupRule>>;
}

/// Read access to provider records.
#[async_trait]
pub trait ProviderRepository: Send + Sync + fmt::Debug {
    /// Returns every provider record in store order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn get_all(&self) -> RepositoryResult<Vec<ProviderRecord>>;
}

/// Read access to provider CUPID pairings.
#[async_trait]
pub trait ProviderCupidsRepository: Send + Sync + fmt::Debug {
    /// Returns the pairings of one provider.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn get_provider_cupids(
        &self,
        provider_id: &ProviderId,
    ) -> RepositoryResult<Vec<ProviderCupid>>;
}

/// Read access to stored request context.
#[async_trait]
pub trait RequestContextRepository: Send + Sync + fmt::Debug {
    /// Returns the context recorded for `request_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn get_by_request_id(
        &self,
        request_id: &RequestId,
    ) -> RepositoryResult<Option<RequestContext>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let error = RepositoryError::connection("refused");
        assert!(matches!(error, RepositoryError::Connection(_)));
        assert_eq!(error.to_string(), "Connection error: refused");
        assert_eq!(
            RepositoryError::serialization("bad json").to_string(),
            "Serialization error: bad json"
        );
    }
}
