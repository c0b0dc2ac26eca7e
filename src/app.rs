//! # Application Wiring
//!
//! Builds the stores, provider adapters and services described by a
//! [`GatewayConfig`].

use crate::api::rest::AppState;
use crate::application::services::{
    MarkupResolver, ProviderDirectory, ProviderGateway, QuotePricingService,
};
use crate::config::GatewayConfig;
use crate::infrastructure::persistence::in_memory::{
    InMemoryMarkupRepository, InMemoryProviderCupidsRepository, InMemoryProviderRepository,
    InMemoryQuoteRepository, InMemoryRequestContextRepository,
};
use crate::infrastructure::persistence::postgres::{
    PostgresMarkupRepository, PostgresProviderCupidsRepository, PostgresProviderRepository,
    PostgresQuoteRepository, PostgresRequestContextRepository, initialize_schema,
};
use crate::infrastructure::persistence::{
    MarkupRepository, ProviderCupidsRepository, ProviderRepository, QuoteRepository,
    RepositoryError, RequestContextRepository,
};
use crate::infrastructure::providers::{ProviderRegistry, ProviderResult};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

/// The five stores the services read and write.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Quote persistence.
    pub quotes: Arc<dyn QuoteRepository>,
    /// Markup rules.
    pub markups: Arc<dyn MarkupRepository>,
    /// Provider records.
    pub providers: Arc<dyn ProviderRepository>,
    /// Provider CUPID pairings.
    pub cupids: Arc<dyn ProviderCupidsRepository>,
    /// Request context (quote type per request).
    pub contexts: Arc<dyn RequestContextRepository>,
}

impl Stores {
    /// Empty in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            quotes: Arc::new(InMemoryQuoteRepository::new()),
            markups: Arc::new(InMemoryMarkupRepository::new()),
            providers: Arc::new(InMemoryProviderRepository::new()),
            cupids: Arc::new(InMemoryProviderCupidsRepository::new()),
            contexts: Arc::new(InMemoryRequestContextRepository::new()),
        }
    }

    /// PostgreSQL stores over a new pool.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Connection` if the pool cannot connect, or
    /// a query error if schema creation fails.
    pub async fn postgres(
        url: &str,
        max_connections: u32,
        create_schema: bool,
    ) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        if create_schema {
            initialize_schema(&pool).await?;
        }

        Ok(Self {
            quotes: Arc::new(PostgresQuoteRepository::new(pool.clone())),
            markups: Arc::new(PostgresMarkupRepository::new(pool.clone())),
            providers: Arc::new(PostgresProviderRepository::new(pool.clone())),
            cupids: Arc::new(PostgresProviderCupidsRepository::new(pool.clone())),
            contexts: Arc::new(PostgresRequestContextRepository::new(pool)),
        })
    }

    /// Stores selected by `config.database`.
    ///
    /// # Errors
    ///
    /// See [`Stores::postgres`].
    pub async fn from_config(config: &GatewayConfig) -> Result<Self, RepositoryError> {
        match &config.database.url {
            Some(url) => {
                info!(max_connections = config.database.max_connections, "using PostgreSQL stores");
                Self::postgres(
                    url,
                    config.database.max_connections,
                    config.database.initialize_schema,
                )
                .await
            }
            None => {
                info!("no database configured, using in-memory stores");
                Ok(Self::in_memory())
            }
        }
    }
}

/// Builds the REST handler state from configuration and stores.
///
/// # Errors
///
/// Returns `ProviderError::Configuration` if a provider entry is invalid.
pub fn build_state(config: &GatewayConfig, stores: Stores) -> ProviderResult<AppState> {
    let registry = ProviderRegistry::from_settings(&config.providers)?;
    info!(providers = ?registry.identifiers(), "provider registry built");

    let policy = config.pricing_policy();
    let resolver = MarkupResolver::new(stores.markups, stores.contexts)
        .with_default_user_type(config.pricing.default_user_type);
    let pricing = QuotePricingService::new(stores.quotes, resolver, policy.term_ceiling);
    let gateway = ProviderGateway::new(Arc::new(registry), pricing)
        .with_default_contract_terms(policy.default_contract_terms);
    let directory = ProviderDirectory::new(stores.providers, stores.cupids);

    Ok(AppState::new(gateway, directory))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_without_database_url() {
        let config = GatewayConfig::default();
        assert!(Stores::from_config(&config).await.is_ok());
    }

    #[test]
    fn builds_state_from_config() {
        let config = GatewayConfig::load_from_str(
            r#"
            [pricing]
            default_contract_terms = [2]

            [[providers]]
            kind = "sky"
            identifier = "sky"
            endpoint = "http://localhost:9000/quotes"
            "#,
        )
        .unwrap();

        let state = build_state(&config, Stores::in_memory()).unwrap();
        assert_eq!(state.gateway.registry().len(), 1);
        assert_eq!(state.gateway.default_contract_terms()[0].years(), 2);
    }
}
