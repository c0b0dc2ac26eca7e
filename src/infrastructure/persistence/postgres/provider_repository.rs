//! # PostgreSQL Provider Repositories
//!
//! PostgreSQL implementations of [`ProviderRepository`] and
//! [`ProviderCupidsRepository`].

use crate::domain::entities::{ProviderCupid, ProviderRecord};
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::persistence::traits::{
    ProviderCupidsRepository, ProviderRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of [`ProviderRepository`].
#[derive(Debug, Clone)]
pub struct PostgresProviderRepository {
    pool: PgPool,
}

impl PostgresProviderRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProviderRepository for PostgresProviderRepository {
    async fn get_all(&self) -> RepositoryResult<Vec<ProviderRecord>> {
        let rows: Vec<ProviderRow> = sqlx::query_as(
            r#"
            SELECT identifier, name, active
            FROM providers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(rows.into_iter().map(ProviderRecord::from).collect())
    }
}

/// PostgreSQL implementation of [`ProviderCupidsRepository`].
#[derive(Debug, Clone)]
pub struct PostgresProviderCupidsRepository {
    pool: PgPool,
}

impl PostgresProviderCupidsRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProviderCupidsRepository for PostgresProviderCupidsRepository {
    async fn get_provider_cupids(
        &self,
        provider_id: &ProviderId,
    ) -> RepositoryResult<Vec<ProviderCupid>> {
        let rows: Vec<CupidRow> = sqlx::query_as(
            r#"
            SELECT provider_id, cupid, description
            FROM provider_cupids
            WHERE provider_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(provider_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(rows.into_iter().map(ProviderCupid::from).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProviderRow {
    identifier: String,
    name: String,
    active: bool,
}

impl From<ProviderRow> for ProviderRecord {
    fn from(row: ProviderRow) -> Self {
        ProviderRecord::new(ProviderId::new(row.identifier), row.name).with_active(row.active)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CupidRow {
    provider_id: String,
    cupid: String,
    description: Option<String>,
}

impl From<CupidRow> for ProviderCupid {
    fn from(row: CupidRow) -> Self {
        ProviderCupid {
            provider_id: ProviderId::new(row.provider_id),
            cupid: row.cupid,
            description: row.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_row_maps_active_flag() {
        let record = ProviderRecord::from(ProviderRow {
            identifier: "colt".to_string(),
            name: "Colt".to_string(),
            active: false,
        });
        assert_eq!(record.identifier().as_str(), "colt");
        assert!(!record.is_active());
    }

    #[test]
    fn cupid_row_keeps_description() {
        let cupid = ProviderCupid::from(CupidRow {
            provider_id: "bt".to_string(),
            cupid: "012".to_string(),
            description: Some("Openreach".to_string()),
        });
        assert_eq!(cupid.description.as_deref(), Some("Openreach"));
    }
}
