//! # Provider Registry
//!
//! Maps configured provider identifiers to their adapters.
//!
//! The registry is built once at startup and never mutated; lookups are
//! read-only and safe to share across requests.

use crate::config::ProviderSettings;
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::http_provider::HttpQuoteProvider;
use crate::infrastructure::providers::kind::ProviderKind;
use crate::infrastructure::providers::traits::QuoteProvider;
use std::collections::HashMap;
use std::sync::Arc;

/// A registered provider adapter.
#[derive(Debug, Clone)]
pub struct RegisteredProvider {
    identifier: ProviderId,
    adapter: Arc<dyn QuoteProvider>,
}

impl RegisteredProvider {
    /// Returns the dispatch identifier.
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &ProviderId {
        &self.identifier
    }

    /// Returns the provider kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        self.adapter.kind()
    }

    /// Returns the adapter.
    #[inline]
    #[must_use]
    pub fn adapter(&self) -> &Arc<dyn QuoteProvider> {
        &self.adapter
    }
}

/// Immutable identifier -> adapter map.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderId, RegisteredProvider>,
}

impl ProviderRegistry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    /// Builds a registry of HTTP adapters from provider settings.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` on blank or duplicate
    /// identifiers or blank endpoints.
    pub fn from_settings(settings: &[ProviderSettings]) -> ProviderResult<Self> {
        settings
            .iter()
            .try_fold(Self::builder(), |builder, entry| {
                let adapter =
                    HttpQuoteProvider::new(entry.kind, entry.endpoint.clone(), entry.timeout_ms)?;
                builder.register(ProviderId::new(entry.identifier.clone()), Arc::new(adapter))
            })
            .map(ProviderRegistryBuilder::build)
    }

    /// Looks up a provider by identifier.
    #[must_use]
    pub fn get(&self, identifier: &ProviderId) -> Option<&RegisteredProvider> {
        self.providers.get(identifier)
    }

    /// Returns true if `identifier` is registered.
    #[must_use]
    pub fn contains(&self, identifier: &ProviderId) -> bool {
        self.providers.contains_key(identifier)
    }

    /// Returns the registered identifiers, sorted.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&ProviderId> {
        let mut identifiers: Vec<_> = self.providers.keys().collect();
        identifiers.sort();
        identifiers
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Builder for [`ProviderRegistry`].
#[derive(Debug, Default)]
pub struct ProviderRegistryBuilder {
    providers: HashMap<ProviderId, RegisteredProvider>,
}

impl ProviderRegistryBuilder {
    /// Registers `adapter` under `identifier`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` if the identifier is blank or
    /// already registered.
    pub fn register(
        mut self,
        identifier: ProviderId,
        adapter: Arc<dyn QuoteProvider>,
    ) -> ProviderResult<Self> {
        if identifier.is_blank() {
            return Err(ProviderError::configuration(format!(
                "{} identifier must not be empty",
                adapter.kind().name()
            )));
        }
        if self.providers.contains_key(&identifier) {
            return Err(ProviderError::configuration(format!(
                "duplicate provider identifier: {identifier}"
            )));
        }

        self.providers.insert(
            identifier.clone(),
            RegisteredProvider {
                identifier,
                adapter,
            },
        );
        Ok(self)
    }

    /// Finishes the registry.
    #[must_use]
    pub fn build(self) -> ProviderRegistry {
        ProviderRegistry {
            providers: self.providers,
        }
    }
}
