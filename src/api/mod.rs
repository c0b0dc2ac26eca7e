//! # API Layer
//!
//! External interfaces of the gateway.
//!
//! - [`rest`]: REST endpoints built on axum

pub mod rest;
