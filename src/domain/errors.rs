//! # Domain Errors
//!
//! Error type for business rule violations in the domain layer.

use crate::domain::value_objects::arithmetic::ArithmeticError;
use thiserror::Error;

/// Error type for domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Contract term outside the accepted range.
    #[error("invalid contract term: {0}")]
    InvalidContractTerm(String),

    /// Identifier is empty or malformed.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Markup field name or value could not be interpreted.
    #[error("invalid markup field: {0}")]
    InvalidMarkupField(String),

    /// Pricing arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates an invalid contract term error.
    #[must_use]
    pub fn invalid_contract_term(message: impl Into<String>) -> Self {
        Self::InvalidContractTerm(message.into())
    }

    /// Creates an invalid identifier error.
    #[must_use]
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Creates an invalid markup field error.
    #[must_use]
    pub fn invalid_markup_field(message: impl Into<String>) -> Self {
        Self::InvalidMarkupField(message.into())
    }

    /// Returns true if the error signals corrupt or inconsistent quote data.
    #[must_use]
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Self::Arithmetic(_) | Self::InvalidContractTerm(_))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
