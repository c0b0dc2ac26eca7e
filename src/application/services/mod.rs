//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure:
//!
//! - [`ProviderGateway`]: routes a quote request to its provider and returns
//!   the caller-facing response
//! - [`QuotePricingService`]: filters, persists and prices provider quotes
//! - [`MarkupResolver`]: finds the markup rule for a request
//! - [`ProviderDirectory`]: provider and CUPID listings

pub mod markup_resolver;
pub mod provider_directory;
pub mod provider_gateway;
pub mod quote_pricing;

pub use markup_resolver::MarkupResolver;
pub use provider_directory::ProviderDirectory;
pub use provider_gateway::{
    GatewayNotice, GatewayResponse, INVALID_PROVIDER_MESSAGE, ProviderGateway,
};
pub use quote_pricing::{PricingPolicy, QuotePricingService};
