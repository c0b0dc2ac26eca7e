//! # In-Memory Quote Repository
//!
//! In-memory implementation of [`QuoteRepository`].

use crate::domain::entities::{QuoteRequest, RawQuote, StoredQuote};
use crate::domain::value_objects::RequestId;
use crate::infrastructure::persistence::traits::{QuoteRepository, RepositoryResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`QuoteRepository`].
///
/// Quotes are kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuoteRepository {
    storage: Arc<RwLock<Vec<StoredQuote>>>,
}

impl InMemoryQuoteRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored quote.
    pub async fn all(&self) -> Vec<StoredQuote> {
        self.storage.read().await.clone()
    }

    /// Clears all quotes.
    pub async fn clear(&self) {
        self.storage.write().await.clear();
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn create_quotes(
        &self,
        quotes: &[RawQuote],
        request: &QuoteRequest,
    ) -> RepositoryResult<Vec<StoredQuote>> {
        let stored: Vec<StoredQuote> = quotes
            .iter()
            .cloned()
            .map(|quote| StoredQuote::from_raw(quote, request))
            .collect();

        let mut storage = self.storage.write().await;
        storage.extend(stored.iter().cloned());
        Ok(stored)
    }

    async fn find_by_request(&self, request_id: &RequestId) -> RepositoryResult<Vec<StoredQuote>> {
        let storage = self.storage.read().await;
        Ok(storage
            .iter()
            .filter(|quote| quote.request_id() == request_id)
            .cloned()
            .collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ContractTerm, ProviderId};
    use rust_decimal::Decimal;

    fn raw(years: u32) -> RawQuote {
        RawQuote::new(ContractTerm::new(years).unwrap(), Decimal::ONE, Decimal::TWO)
    }

    fn request(id: &str) -> QuoteRequest {
        QuoteRequest::new(RequestId::new(id), ProviderId::new("neos"))
    }

    #[tokio::test]
    async fn new_repository_is_empty() {
        let repo = InMemoryQuoteRepository::new();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_returns_stored_in_order() {
        let repo = InMemoryQuoteRepository::new();
        let stored = repo
            .create_quotes(&[raw(1), raw(3)], &request("r-1"))
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].term().years(), 1);
        assert_eq!(stored[1].term().years(), 3);
        assert_eq!(stored[0].provider().as_str(), "neos");
        assert_ne!(stored[0].id(), stored[1].id());
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn find_by_request_filters() {
        let repo = InMemoryQuoteRepository::new();
        repo.create_quotes(&[raw(1)], &request("a")).await.unwrap();
        repo.create_quotes(&[raw(2), raw(3)], &request("b"))
            .await
            .unwrap();

        let found = repo.find_by_request(&RequestId::new("b")).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|q| q.request_id().as_str() == "b"));
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let repo = InMemoryQuoteRepository::new();
        repo.create_quotes(&[raw(1)], &request("a")).await.unwrap();
        repo.clear().await;
        assert!(repo.all().await.is_empty());
    }
}
