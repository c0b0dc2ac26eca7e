//! # In-Memory Repositories
//!
//! In-memory implementations used by tests and when no database is
//! configured.
//!
//! ## Available Repositories
//!
//! - [`InMemoryQuoteRepository`]: quote persistence
//! - [`InMemoryMarkupRepository`]: markup rules
//! - [`InMemoryProviderRepository`]: provider records
//! - [`InMemoryProviderCupidsRepository`]: provider CUPID pairings
//! - [`InMemoryRequestContextRepository`]: request context
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<tokio::sync::RwLock<_>>` for shared access.

pub mod markup_repository;
pub mod provider_repository;
pub mod quote_repository;
pub mod request_context_repository;

pub use markup_repository::InMemoryMarkupRepository;
pub use provider_repository::{InMemoryProviderCupidsRepository, InMemoryProviderRepository};
pub use quote_repository::InMemoryQuoteRepository;
pub use request_context_repository::InMemoryRequestContextRepository;
