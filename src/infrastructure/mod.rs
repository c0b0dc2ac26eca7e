//! # Infrastructure Layer
//!
//! Adapters to the outside world.
//!
//! - [`providers`]: provider quoting APIs
//! - [`persistence`]: repositories (in-memory and PostgreSQL)

pub mod persistence;
pub mod providers;
