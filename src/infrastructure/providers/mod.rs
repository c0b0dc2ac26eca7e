//! # Provider Adapters
//!
//! Integrations with upstream connectivity providers.
//!
//! - [`traits`]: the [`QuoteProvider`] port and its reply types
//! - [`kind`]: supported providers and their dispatch rules
//! - [`registry`]: identifier -> adapter map built from configuration
//! - [`http_provider`]: HTTP adapter used for every provider
//! - [`http_client`]: shared `reqwest` wrapper
//! - [`error`]: adapter error type

pub mod error;
pub mod http_client;
pub mod http_provider;
pub mod kind;
pub mod registry;
pub mod traits;

pub use error::{ProviderError, ProviderResult};
pub use http_provider::HttpQuoteProvider;
pub use kind::{ProviderKind, TermDispatch};
pub use registry::{ProviderRegistry, ProviderRegistryBuilder, RegisteredProvider};
pub use traits::{FetchMode, ProviderReply, QuoteProvider, UpstreamPayload};
