//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)                 - pricing arithmetic, bad terms
//! ├── Infrastructure(InfrastructureError) - persistence and setup failures
//! ├── Provider(ProviderError)             - undecodable provider data
//! └── Validation(String)                  - malformed request input
//! ```
//!
//! Upstream rejections and transport failures of a provider are not
//! application errors; the gateway answers them with an upstream payload.
//!
//! # Examples
//!
//! ```
//! use provider_gateway::application::error::{ApplicationError, InfrastructureError};
//!
//! let err = ApplicationError::validation("contract_term must not be empty");
//! assert!(err.is_validation());
//!
//! let infra_err = InfrastructureError::database("connection timeout");
//! let app_err: ApplicationError = infra_err.into();
//! assert!(app_err.is_infrastructure());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use crate::infrastructure::providers::ProviderError;
use thiserror::Error;

/// Infrastructure layer error.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Database error.
    #[error("database error: {0}")]
    Database(String),

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl InfrastructureError {
    /// Creates a database error.
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from pricing logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Infrastructure error from external systems.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    /// Provider returned data that could not be used.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        Self::Infrastructure(InfrastructureError::Repository(error))
    }
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if infrastructure (storage, setup) failed.
    #[must_use]
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Infrastructure(_))
    }

    /// Returns true if quote data was corrupt or inconsistent.
    #[must_use]
    pub fn is_data_integrity(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_data_integrity(),
            Self::Provider(e) => e.is_protocol(),
            _ => false,
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
