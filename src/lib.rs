//! # Provider Gateway
//!
//! Quote gateway for telecom connectivity providers.
//!
//! A [`QuoteRequest`](domain::entities::QuoteRequest) names one provider by
//! its configured identifier. The gateway routes it to that provider's
//! quoting API, normalizes the returned quotes, persists them and prices
//! them with the markup rule configured for the requesting user type.
//!
//! ## Layers
//!
//! - [`domain`]: quotes, markup rules, contract terms and the pure pricing
//!   arithmetic
//! - [`application`]: the gateway orchestrator, markup resolution and the
//!   provider directory
//! - [`infrastructure`]: provider adapters (HTTP) and persistence (in-memory
//!   and PostgreSQL)
//! - [`api`]: REST surface built on axum
//! - [`app`]: wiring of stores, adapters and services from configuration
//! - [`config`] and [`telemetry`]: configuration loading and logging setup

pub mod api;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
