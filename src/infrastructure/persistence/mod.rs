//! # Persistence Layer
//!
//! ## Repository Traits (Ports)
//!
//! - [`QuoteRepository`]: computed quotes
//! - [`MarkupRepository`]: markup rules
//! - [`ProviderRepository`] / [`ProviderCupidsRepository`]: provider listing
//! - [`RequestContextRepository`]: request context
//!
//! ## Implementations
//!
//! - [`in_memory`]: in-process storage for tests and database-less runs
//! - [`postgres`]: PostgreSQL via sqlx

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{
    MarkupRepository, ProviderCupidsRepository, ProviderRepository, QuoteRepository,
    RepositoryError, RepositoryResult, RequestContextRepository,
};
