//! # PostgreSQL Schema
//!
//! Idempotent schema setup for the gateway tables.
//!
//! Markup columns follow the `{component}_{kind}_{n}yr` naming for every
//! term up to [`MARKUP_SCHEMA_TERMS`].

use crate::domain::entities::{AdjustmentKind, CostComponent, MarkupField};
use crate::domain::value_objects::ContractTerm;
use crate::infrastructure::persistence::traits::{RepositoryError, RepositoryResult};
use sqlx::PgPool;
use tracing::info;

/// Highest contract term with markup columns.
pub const MARKUP_SCHEMA_TERMS: u32 = 5;

/// Returns the markup column names for terms `1..=max_term`.
#[must_use]
pub fn markup_columns(max_term: u32) -> Vec<String> {
    (1..=max_term)
        .filter_map(|years| ContractTerm::new(years).ok())
        .flat_map(|term| {
            CostComponent::ALL.into_iter().flat_map(move |component| {
                AdjustmentKind::ALL.into_iter().map(move |kind| {
                    MarkupField {
                        component,
                        kind,
                        term,
                    }
                    .to_string()
                })
            })
        })
        .collect()
}

/// Creates the gateway tables if they do not exist.
///
/// # Errors
///
/// Returns `RepositoryError::Query` if a statement fails.
pub async fn initialize_schema(pool: &PgPool) -> RepositoryResult<()> {
    let markup_columns: String = markup_columns(MARKUP_SCHEMA_TERMS)
        .iter()
        .map(|column| format!(",\n            {column} NUMERIC(14, 4)"))
        .collect();

    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS quotes (
            id UUID PRIMARY KEY,
            request_id TEXT NOT NULL,
            provider TEXT NOT NULL,
            term INTEGER NOT NULL,
            position INTEGER NOT NULL,
            payload JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#
        .to_string(),
        "CREATE INDEX IF NOT EXISTS idx_quotes_request ON quotes(request_id, created_at, position)"
            .to_string(),
        format!(
            r#"
        CREATE TABLE IF NOT EXISTS markups (
            id BIGSERIAL PRIMARY KEY,
            user_type INTEGER NOT NULL,
            supplier_id TEXT NOT NULL{markup_columns},
            UNIQUE (user_type, supplier_id)
        )
        "#
        ),
        r#"
        CREATE TABLE IF NOT EXISTS providers (
            id BIGSERIAL PRIMARY KEY,
            identifier TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            active BOOLEAN NOT NULL DEFAULT true
        )
        "#
        .to_string(),
        r#"
        CREATE TABLE IF NOT EXISTS provider_cupids (
            id BIGSERIAL PRIMARY KEY,
            provider_id TEXT NOT NULL,
            cupid TEXT NOT NULL,
            description TEXT
        )
        "#
        .to_string(),
        r#"
        CREATE TABLE IF NOT EXISTS quote_requests (
            request_id TEXT PRIMARY KEY,
            quote_type_id INTEGER
        )
        "#
        .to_string(),
    ];

    for statement in &statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;
    }

    info!(statements = statements.len(), "database schema initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_columns_cover_every_field() {
        let columns = markup_columns(3);
        assert_eq!(columns.len(), 12);
        assert!(columns.contains(&"connection_addition_1yr".to_string()));
        assert!(columns.contains(&"rental_markup_3yr".to_string()));
        assert!(columns.iter().all(|c| c.parse::<MarkupField>().is_ok()));
    }

    #[test]
    fn no_columns_without_terms() {
        assert!(markup_columns(0).is_empty());
    }
}
