//! # Configuration
//!
//! Gateway configuration, layered with the `config` crate:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (default `config/gateway.toml`)
//! 3. environment variables prefixed `GATEWAY`, `__` between sections
//!    (e.g. `GATEWAY__PRICING__TERM_CEILING=5`)
//!
//! # Example
//!
//! ```
//! use provider_gateway::config::GatewayConfig;
//!
//! let config = GatewayConfig::load_from_str(
//!     r#"
//!     [pricing]
//!     term_ceiling = 5
//!
//!     [[providers]]
//!     kind = "neos"
//!     identifier = "neos"
//!     endpoint = "http://localhost:9001/quotes"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.pricing.term_ceiling.years(), 5);
//! assert_eq!(config.providers[0].timeout_ms, 5000);
//! ```

use crate::application::services::PricingPolicy;
use crate::domain::value_objects::{ContractTerm, DEFAULT_CONTRACT_TERMS, DEFAULT_TERM_CEILING, UserType};
use crate::infrastructure::providers::ProviderKind;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "GATEWAY";

/// Configuration loading or validation failure.
#[derive(Debug, Error)]
pub enum GatewayConfigError {
    /// The sources could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl GatewayConfigError {
    /// Creates a validation error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Result type for configuration loading.
pub type GatewayConfigResult<T> = Result<T, GatewayConfigError>;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Listen address.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Pricing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingSettings {
    /// Longest contract term offered.
    #[serde(default = "default_term_ceiling")]
    pub term_ceiling: ContractTerm,
    /// Terms requested when a request names none.
    #[serde(default = "default_contract_terms")]
    pub default_contract_terms: Vec<ContractTerm>,
    /// User type for requests without a recorded quote type.
    #[serde(default = "default_user_type")]
    pub default_user_type: UserType,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            term_ceiling: default_term_ceiling(),
            default_contract_terms: default_contract_terms(),
            default_user_type: default_user_type(),
        }
    }
}

/// One provider adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    /// Provider kind.
    pub kind: ProviderKind,
    /// Identifier callers use in `QuoteRequest::provider`.
    pub identifier: String,
    /// Quoting API URL.
    pub endpoint: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Database settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL URL; in-memory stores are used when absent.
    #[serde(default)]
    pub url: Option<String>,
    /// Pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Create missing tables on startup.
    #[serde(default)]
    pub initialize_schema: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            initialize_schema: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    /// Emit JSON lines instead of pretty output.
    #[serde(default)]
    pub json: bool,
}

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server.
    #[serde(default)]
    pub server: ServerSettings,
    /// Pricing.
    #[serde(default)]
    pub pricing: PricingSettings,
    /// Provider adapters.
    #[serde(default)]
    pub providers: Vec<ProviderSettings>,
    /// Database.
    #[serde(default)]
    pub database: DatabaseSettings,
    /// Logging.
    #[serde(default)]
    pub logging: LoggingSettings,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_term_ceiling() -> ContractTerm {
    DEFAULT_TERM_CEILING
}

fn default_contract_terms() -> Vec<ContractTerm> {
    DEFAULT_CONTRACT_TERMS.to_vec()
}

fn default_user_type() -> UserType {
    UserType::DEFAULT
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_max_connections() -> u32 {
    5
}

impl GatewayConfig {
    /// Loads configuration from `path` (optional) and the environment.
    ///
    /// # Errors
    ///
    /// Returns `GatewayConfigError` if a source is malformed or validation
    /// fails.
    pub fn load(path: Option<&str>) -> GatewayConfigResult<Self> {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let config: Self = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from TOML text, without the environment.
    ///
    /// # Errors
    ///
    /// Returns `GatewayConfigError` if the text is malformed or validation
    /// fails.
    pub fn load_from_str(toml: &str) -> GatewayConfigResult<Self> {
        let config: Self = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `GatewayConfigError::Invalid` describing the first violation.
    pub fn validate(&self) -> GatewayConfigResult<()> {
        if self.pricing.default_contract_terms.is_empty() {
            return Err(GatewayConfigError::invalid(
                "pricing.default_contract_terms must not be empty",
            ));
        }
        if self.database.max_connections == 0 {
            return Err(GatewayConfigError::invalid(
                "database.max_connections must be greater than 0",
            ));
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            let identifier = provider.identifier.trim();
            if identifier.is_empty() {
                return Err(GatewayConfigError::invalid(format!(
                    "provider identifier for {} must not be empty",
                    provider.kind
                )));
            }
            if !seen.insert(identifier) {
                return Err(GatewayConfigError::invalid(format!(
                    "duplicate provider identifier '{identifier}'"
                )));
            }
            if provider.endpoint.trim().is_empty() {
                return Err(GatewayConfigError::invalid(format!(
                    "provider '{identifier}' has no endpoint"
                )));
            }
            if provider.timeout_ms == 0 {
                return Err(GatewayConfigError::invalid(format!(
                    "provider '{identifier}' timeout_ms must be greater than 0"
                )));
            }
        }
        Ok(())
    }

    /// Returns the pricing policy described by the `pricing` section.
    #[must_use]
    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy::default()
            .with_term_ceiling(self.pricing.term_ceiling)
            .with_default_contract_terms(self.pricing.default_contract_terms.clone())
    }
}
