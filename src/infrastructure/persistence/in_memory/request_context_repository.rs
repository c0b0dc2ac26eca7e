//! # In-Memory Request Context Repository
//!
//! In-memory implementation of [`RequestContextRepository`].

use crate::domain::entities::RequestContext;
use crate::domain::value_objects::RequestId;
use crate::infrastructure::persistence::traits::{RepositoryResult, RequestContextRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`RequestContextRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryRequestContextRepository {
    storage: Arc<RwLock<HashMap<RequestId, RequestContext>>>,
}

impl InMemoryRequestContextRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a context.
    pub async fn insert(&self, context: RequestContext) {
        let mut storage = self.storage.write().await;
        storage.insert(context.request_id.clone(), context);
    }
}

#[async_trait]
impl RequestContextRepository for InMemoryRequestContextRepository {
    async fn get_by_request_id(
        &self,
        request_id: &RequestId,
    ) -> RepositoryResult<Option<RequestContext>> {
        let storage = self.storage.read().await;
        Ok(storage.get(request_id).cloned())
    }
}
