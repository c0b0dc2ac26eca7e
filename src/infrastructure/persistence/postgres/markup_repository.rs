//! # PostgreSQL Markup Repository
//!
//! PostgreSQL implementation of [`MarkupRepository`].
//!
//! The `markups` table keeps one row per `(user_type, supplier_id)` with a
//! flat NUMERIC column per markup field (`rental_markup_3yr`, ...). Columns
//! are discovered from the row, so terms added to the table are picked up
//! without code changes.

use crate::domain::entities::{MarkupField, MarkupRule};
use crate::domain::value_objects::{ProviderId, UserType};
use crate::infrastructure::persistence::traits::{
    MarkupRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{Column, PgPool, Row};

/// PostgreSQL implementation of [`MarkupRepository`].
#[derive(Debug, Clone)]
pub struct PostgresMarkupRepository {
    pool: PgPool,
}

impl PostgresMarkupRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MarkupRepository for PostgresMarkupRepository {
    async fn get_markup(
        &self,
        user_type: UserType,
        supplier_id: &ProviderId,
    ) -> RepositoryResult<Option<MarkupRule>> {
        let user_type_value = i32::try_from(user_type.get())
            .map_err(|e| RepositoryError::internal(e.to_string()))?;

        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT *
            FROM markups
            WHERE user_type = $1 AND supplier_id = $2
            LIMIT 1
            "#,
        )
        .bind(user_type_value)
        .bind(supplier_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(|row| rule_from_row(&row, user_type, supplier_id))
            .transpose()
    }
}

/// Builds a rule from the markup columns of `row`; other columns are ignored.
fn rule_from_row(
    row: &PgRow,
    user_type: UserType,
    supplier_id: &ProviderId,
) -> RepositoryResult<MarkupRule> {
    let mut rule = MarkupRule::new(user_type, supplier_id.clone());

    for column in row.columns() {
        let Ok(field) = column.name().parse::<MarkupField>() else {
            continue;
        };
        let value: Option<Decimal> = row
            .try_get(column.ordinal())
            .map_err(|e| RepositoryError::serialization(format!("{}: {}", field, e)))?;
        rule.set(field.term, field.component, field.kind, value);
    }

    Ok(rule)
}
