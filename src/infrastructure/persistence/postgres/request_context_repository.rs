//! # PostgreSQL Request Context Repository
//!
//! PostgreSQL implementation of [`RequestContextRepository`], reading the
//! `quote_type_id` recorded for each quote request.

use crate::domain::entities::RequestContext;
use crate::domain::value_objects::{RequestId, UserType};
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, RequestContextRepository,
};
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of [`RequestContextRepository`].
#[derive(Debug, Clone)]
pub struct PostgresRequestContextRepository {
    pool: PgPool,
}

impl PostgresRequestContextRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestContextRepository for PostgresRequestContextRepository {
    async fn get_by_request_id(
        &self,
        request_id: &RequestId,
    ) -> RepositoryResult<Option<RequestContext>> {
        let row: Option<ContextRow> = sqlx::query_as(
            r#"
            SELECT request_id, quote_type_id
            FROM quote_requests
            WHERE request_id = $1
            "#,
        )
        .bind(request_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(ContextRow::try_into_context).transpose()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContextRow {
    request_id: String,
    quote_type_id: Option<i32>,
}

impl ContextRow {
    fn try_into_context(self) -> RepositoryResult<RequestContext> {
        let quote_type_id = self
            .quote_type_id
            .map(u32::try_from)
            .transpose()
            .map_err(|e| RepositoryError::serialization(format!("quote_type_id: {}", e)))?
            .map(UserType::new);

        Ok(RequestContext {
            request_id: RequestId::new(self.request_id),
            quote_type_id,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn maps_quote_type() {
        let context = ContextRow {
            request_id: "r".to_string(),
            quote_type_id: Some(2),
        }
        .try_into_context()
        .unwrap();
        assert_eq!(context.quote_type_id, Some(UserType::new(2)));
    }

    #[test]
    fn missing_quote_type_stays_none() {
        let context = ContextRow {
            request_id: "r".to_string(),
            quote_type_id: None,
        }
        .try_into_context()
        .unwrap();
        assert!(context.quote_type_id.is_none());
    }

    #[test]
    fn negative_quote_type_is_rejected() {
        let result = ContextRow {
            request_id: "r".to_string(),
            quote_type_id: Some(-1),
        }
        .try_into_context();
        assert!(matches!(result, Err(RepositoryError::Serialization(_))));
    }
}
