//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`ProviderId`], [`RequestId`]: string-based identifiers
//! - [`QuoteId`]: UUID-based identifier for persisted quotes
//! - [`UserType`]: user category selecting markup rules
//!
//! ## Terms and Arithmetic
//!
//! - [`ContractTerm`]: contract length in years
//! - [`CheckedArithmetic`]: safe decimal operations
//! - [`format_fixed`]: fixed-point rendering of sell prices

pub mod arithmetic;
pub mod contract_term;
pub mod ids;
pub mod timestamp;

pub use arithmetic::{
    ArithmeticError, ArithmeticResult, CheckedArithmetic, format_fixed, percentage_factor,
};
pub use contract_term::{ContractTerm, DEFAULT_CONTRACT_TERMS, DEFAULT_TERM_CEILING};
pub use ids::{ProviderId, QuoteId, RequestId, UserType};
pub use timestamp::Timestamp;
