//! # Application Layer
//!
//! Use cases built on the domain and infrastructure layers.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, InfrastructureError};
pub use services::{
    GatewayResponse, MarkupResolver, PricingPolicy, ProviderDirectory, ProviderGateway,
    QuotePricingService,
};
