//! # Domain Layer
//!
//! Provider-independent model of quotes and pricing.
//!
//! - [`value_objects`]: identifiers, contract terms, checked arithmetic
//! - [`entities`]: requests, raw/stored/priced quotes, markup rules,
//!   provider records
//! - [`services`]: pure pricing functions
//! - [`errors`]: domain error type

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
