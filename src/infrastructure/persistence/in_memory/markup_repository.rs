//! # In-Memory Markup Repository
//!
//! In-memory implementation of [`MarkupRepository`].

use crate::domain::entities::MarkupRule;
use crate::domain::value_objects::{ProviderId, UserType};
use crate::infrastructure::persistence::traits::{MarkupRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type MarkupKey = (UserType, ProviderId);

/// In-memory implementation of [`MarkupRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarkupRepository {
    storage: Arc<RwLock<HashMap<MarkupKey, MarkupRule>>>,
}

impl InMemoryMarkupRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with `rules`.
    #[must_use]
    pub fn with_rules(rules: impl IntoIterator<Item = MarkupRule>) -> Self {
        let storage = rules
            .into_iter()
            .map(|rule| ((rule.user_type(), rule.supplier_id().clone()), rule))
            .collect();
        Self {
            storage: Arc::new(RwLock::new(storage)),
        }
    }

    /// Inserts or replaces a rule.
    pub async fn insert(&self, rule: MarkupRule) {
        let mut storage = self.storage.write().await;
        storage.insert((rule.user_type(), rule.supplier_id().clone()), rule);
    }
}

#[async_trait]
impl MarkupRepository for InMemoryMarkupRepository {
    async fn get_markup(
        &self,
        user_type: UserType,
        supplier_id: &ProviderId,
    ) -> RepositoryResult<Option<MarkupRule>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&(user_type, supplier_id.clone())).cloned())
    }
}
