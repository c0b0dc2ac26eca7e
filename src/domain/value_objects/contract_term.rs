//! # Contract Term
//!
//! Contract duration in whole years.
//!
//! # Examples
//!
//! ```
//! use provider_gateway::domain::value_objects::contract_term::ContractTerm;
//!
//! let term = ContractTerm::new(3).unwrap();
//! let ceiling = ContractTerm::new(3).unwrap();
//! assert!(term.is_within(ceiling));
//! assert_eq!(term.to_string(), "3yr");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terms requested when a quote request does not list any.
pub const DEFAULT_CONTRACT_TERMS: [ContractTerm; 2] = [ContractTerm(1), ContractTerm(3)];

/// Longest term priced unless configured otherwise.
pub const DEFAULT_TERM_CEILING: ContractTerm = ContractTerm(3);

/// A contract duration in years.
///
/// # Invariants
///
/// - Always at least one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ContractTerm(u32);

impl ContractTerm {
    /// Creates a contract term.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidContractTerm` if `years` is zero.
    pub fn new(years: u32) -> DomainResult<Self> {
        if years == 0 {
            return Err(DomainError::invalid_contract_term(
                "term must be at least one year",
            ));
        }
        Ok(Self(years))
    }

    /// Returns the number of years.
    #[inline]
    #[must_use]
    pub const fn years(&self) -> u32 {
        self.0
    }

    /// Returns true if this term does not exceed `ceiling`.
    #[inline]
    #[must_use]
    pub fn is_within(&self, ceiling: ContractTerm) -> bool {
        self.0 <= ceiling.0
    }

    /// Parses a list of years into terms.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidContractTerm` on the first invalid entry.
    pub fn from_years(years: &[u32]) -> DomainResult<Vec<Self>> {
        years.iter().copied().map(Self::new).collect()
    }
}

impl TryFrom<u32> for ContractTerm {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContractTerm> for u32 {
    fn from(term: ContractTerm) -> Self {
        term.0
    }
}

impl fmt::Display for ContractTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}yr", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert!(ContractTerm::new(0).is_err());
    }

    #[test]
    fn ceiling_is_inclusive() {
        let ceiling = ContractTerm::new(3).unwrap();
        assert!(ContractTerm::new(3).unwrap().is_within(ceiling));
        assert!(!ContractTerm::new(5).unwrap().is_within(ceiling));
    }

    #[test]
    fn deserialize_validates() {
        let term: ContractTerm = serde_json::from_str("2").unwrap();
        assert_eq!(term.years(), 2);
        assert!(serde_json::from_str::<ContractTerm>("0").is_err());
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&ContractTerm::new(5).unwrap()).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn from_years_matches_defaults() {
        let terms = ContractTerm::from_years(&[1, 3]).unwrap();
        assert_eq!(terms, DEFAULT_CONTRACT_TERMS.to_vec());
        assert!(terms.iter().all(|term| term.is_within(DEFAULT_TERM_CEILING)));
    }
}
