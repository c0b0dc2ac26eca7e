//! # In-Memory Provider Repositories
//!
//! In-memory implementations of [`ProviderRepository`] and
//! [`ProviderCupidsRepository`].

use crate::domain::entities::{ProviderCupid, ProviderRecord};
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::persistence::traits::{
    ProviderCupidsRepository, ProviderRepository, RepositoryResult,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`ProviderRepository`].
///
/// Records are returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderRepository {
    storage: Arc<RwLock<Vec<ProviderRecord>>>,
}

impl InMemoryProviderRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with `records`.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = ProviderRecord>) -> Self {
        Self {
            storage: Arc::new(RwLock::new(records.into_iter().collect())),
        }
    }

    /// Appends a record.
    pub async fn insert(&self, record: ProviderRecord) {
        self.storage.write().await.push(record);
    }
}

#[async_trait]
impl ProviderRepository for InMemoryProviderRepository {
    async fn get_all(&self) -> RepositoryResult<Vec<ProviderRecord>> {
        Ok(self.storage.read().await.clone())
    }
}

/// In-memory implementation of [`ProviderCupidsRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderCupidsRepository {
    storage: Arc<RwLock<Vec<ProviderCupid>>>,
}

impl InMemoryProviderCupidsRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with `cupids`.
    #[must_use]
    pub fn with_cupids(cupids: impl IntoIterator<Item = ProviderCupid>) -> Self {
        Self {
            storage: Arc::new(RwLock::new(cupids.into_iter().collect())),
        }
    }
}

#[async_trait]
impl ProviderCupidsRepository for InMemoryProviderCupidsRepository {
    async fn get_provider_cupids(
        &self,
        provider_id: &ProviderId,
    ) -> RepositoryResult<Vec<ProviderCupid>> {
        let storage = self.storage.read().await;
        Ok(storage
            .iter()
            .filter(|cupid| &cupid.provider_id == provider_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_all_preserves_order() {
        let repo = InMemoryProviderRepository::with_records([
            ProviderRecord::new(ProviderId::new("b"), "B"),
            ProviderRecord::new(ProviderId::new("a"), "A").with_active(false),
        ]);
        repo.insert(ProviderRecord::new(ProviderId::new("c"), "C"))
            .await;

        let all = repo.get_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(ProviderRecord::name).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[tokio::test]
    async fn cupids_filtered_by_provider() {
        let repo = InMemoryProviderCupidsRepository::with_cupids([
            ProviderCupid::new(ProviderId::new("sky"), "100"),
            ProviderCupid::new(ProviderId::new("bt"), "200"),
            ProviderCupid::new(ProviderId::new("sky"), "101"),
        ]);

        let cupids = repo
            .get_provider_cupids(&ProviderId::new("sky"))
            .await
            .unwrap();
        assert_eq!(cupids.len(), 2);
        assert_eq!(cupids[1].cupid, "101");

        assert!(
            repo.get_provider_cupids(&ProviderId::new("colt"))
                .await
                .unwrap()
                .is_empty()
        );
    }
}
