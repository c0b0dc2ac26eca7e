//! # PostgreSQL Repositories
//!
//! sqlx-backed implementations of the repository traits.
//!
//! ```ignore
//! use sqlx::PgPool;
//! use provider_gateway::infrastructure::persistence::postgres::PostgresQuoteRepository;
//!
//! let pool = PgPool::connect("postgres://...").await?;
//! let quotes = PostgresQuoteRepository::new(pool);
//! ```

pub mod markup_repository;
pub mod provider_repository;
pub mod quote_repository;
pub mod request_context_repository;
pub mod schema;

pub use markup_repository::PostgresMarkupRepository;
pub use provider_repository::{PostgresProviderCupidsRepository, PostgresProviderRepository};
pub use quote_repository::PostgresQuoteRepository;
pub use request_context_repository::PostgresRequestContextRepository;
pub use schema::initialize_schema;
