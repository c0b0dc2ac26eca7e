//! # PostgreSQL Quote Repository
//!
//! PostgreSQL implementation of [`QuoteRepository`] using sqlx.
//!
//! Each quote is one row; the provider record itself (term, costs, product
//! and every extra field) is kept as a JSONB payload.

use crate::domain::entities::{QuoteRequest, RawQuote, StoredQuote};
use crate::domain::value_objects::{ProviderId, QuoteId, RequestId, Timestamp};
use crate::infrastructure::persistence::traits::{
    QuoteRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of [`QuoteRepository`].
///
/// A batch is written in one transaction.
#[derive(Debug, Clone)]
pub struct PostgresQuoteRepository {
    pool: PgPool,
}

impl PostgresQuoteRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl QuoteRepository for PostgresQuoteRepository {
    async fn create_quotes(
        &self,
        quotes: &[RawQuote],
        request: &QuoteRequest,
    ) -> RepositoryResult<Vec<StoredQuote>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        let mut stored = Vec::with_capacity(quotes.len());
        for (position, quote) in quotes.iter().enumerate() {
            let payload = serde_json::to_value(quote)
                .map_err(|e| RepositoryError::serialization(e.to_string()))?;
            let position = i32::try_from(position)
                .map_err(|e| RepositoryError::internal(e.to_string()))?;
            let term = i32::try_from(quote.term().years())
                .map_err(|e| RepositoryError::internal(e.to_string()))?;
            let record = StoredQuote::from_raw(quote.clone(), request);

            sqlx::query(
                r#"
                INSERT INTO quotes (
                    id, request_id, provider, term, position, payload, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(record.id().get())
            .bind(record.request_id().as_str())
            .bind(record.provider().as_str())
            .bind(term)
            .bind(position)
            .bind(&payload)
            .bind(record.created_at().as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

            stored.push(record);
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(stored)
    }

    async fn find_by_request(&self, request_id: &RequestId) -> RepositoryResult<Vec<StoredQuote>> {
        let rows: Vec<QuoteRow> = sqlx::query_as(
            r#"
            SELECT id, request_id, provider, payload, created_at
            FROM quotes
            WHERE request_id = $1
            ORDER BY created_at ASC, position ASC
            "#,
        )
        .bind(request_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(QuoteRow::try_into_stored).collect()
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quotes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        u64::try_from(count).map_err(|e| RepositoryError::internal(e.to_string()))
    }
}

/// Row type for quote queries.
#[derive(Debug, sqlx::FromRow)]
struct QuoteRow {
    id: Uuid,
    request_id: String,
    provider: String,
    payload: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl QuoteRow {
    fn try_into_stored(self) -> RepositoryResult<StoredQuote> {
        let raw: RawQuote = serde_json::from_value(self.payload)
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;

        Ok(StoredQuote::from_parts(
            QuoteId::new(self.id),
            RequestId::new(self.request_id),
            ProviderId::new(self.provider),
            raw,
            Timestamp::from(self.created_at),
        ))
    }
}
