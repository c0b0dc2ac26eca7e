//! # Provider Directory
//!
//! Read-only views over stored provider records and CUPID pairings.

use crate::application::error::ApplicationResult;
use crate::domain::entities::{ProviderCupid, ProviderRecord};
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::persistence::{ProviderCupidsRepository, ProviderRepository};
use std::sync::Arc;

/// Lists providers and their CUPID pairings.
#[derive(Debug, Clone)]
pub struct ProviderDirectory {
    providers: Arc<dyn ProviderRepository>,
    cupids: Arc<dyn ProviderCupidsRepository>,
}

impl ProviderDirectory {
    /// Creates a directory over the given stores.
    #[must_use]
    pub fn new(
        providers: Arc<dyn ProviderRepository>,
        cupids: Arc<dyn ProviderCupidsRepository>,
    ) -> Self {
        Self { providers, cupids }
    }

    /// Returns the active providers, in store order.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` if the store fails.
    pub async fn list_active_providers(&self) -> ApplicationResult<Vec<ProviderRecord>> {
        let mut records = self.providers.get_all().await?;
        records.retain(ProviderRecord::is_active);
        Ok(records)
    }

    /// Returns every provider record.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` if the store fails.
    pub async fn list_all_providers(&self) -> ApplicationResult<Vec<ProviderRecord>> {
        Ok(self.providers.get_all().await?)
    }

    /// Returns the CUPID pairings of `provider_id`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` if the store fails.
    pub async fn get_provider_cupids(
        &self,
        provider_id: &ProviderId,
    ) -> ApplicationResult<Vec<ProviderCupid>> {
        Ok(self.cupids.get_provider_cupids(provider_id).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::in_memory::{
        InMemoryProviderCupidsRepository, InMemoryProviderRepository,
    };

    fn record(id: &str, active: bool) -> ProviderRecord {
        ProviderRecord::new(ProviderId::new(id), id.to_uppercase()).with_active(active)
    }

    fn directory() -> ProviderDirectory {
        let providers = InMemoryProviderRepository::with_records([
            record("neos", true),
            record("colt", false),
            record("sky", true),
            record("bt", false),
            record("its", true),
        ]);
        let cupids = InMemoryProviderCupidsRepository::with_cupids([
            ProviderCupid::new(ProviderId::new("sky"), "123"),
            ProviderCupid::new(ProviderId::new("sky"), "456"),
            ProviderCupid::new(ProviderId::new("bt"), "789"),
        ]);
        ProviderDirectory::new(Arc::new(providers), Arc::new(cupids))
    }

    fn ids(records: &[ProviderRecord]) -> Vec<&str> {
        records.iter().map(|r| r.identifier().as_str()).collect()
    }

    #[tokio::test]
    async fn active_is_ordered_subset_of_all() {
        let directory = directory();
        let all = directory.list_all_providers().await.unwrap();
        let active = directory.list_active_providers().await.unwrap();

        assert_eq!(ids(&all), vec!["neos", "colt", "sky", "bt", "its"]);
        assert_eq!(ids(&active), vec!["neos", "sky", "its"]);

        let expected: Vec<_> = all.iter().filter(|r| r.is_active()).cloned().collect();
        assert_eq!(active, expected);
    }

    #[tokio::test]
    async fn cupids_are_looked_up_per_provider() {
        let directory = directory();
        let cupids = directory
            .get_provider_cupids(&ProviderId::new("sky"))
            .await
            .unwrap();
        let codes: Vec<_> = cupids.iter().map(|c| c.cupid.as_str()).collect();
        assert_eq!(codes, vec!["123", "456"]);

        assert!(
            directory
                .get_provider_cupids(&ProviderId::new("none"))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn empty_store() {
        let directory = ProviderDirectory::new(
            Arc::new(InMemoryProviderRepository::new()),
            Arc::new(InMemoryProviderCupidsRepository::new()),
        );
        assert!(directory.list_active_providers().await.unwrap().is_empty());
    }
}
