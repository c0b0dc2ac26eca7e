//! # REST API
//!
//! REST endpoints using axum.
//!
//! # Endpoints
//!
//! ## Quotes
//! - `POST /api/v1/quotes?debug=<bool>` - Dispatch a quote request to its provider
//!
//! ## Providers
//! - `GET /api/v1/providers` - List active providers
//! - `GET /api/v1/providers/all` - List all providers
//! - `GET /api/v1/providers/{id}/cupids` - List CUPID pairings of a provider
//!
//! ## Health
//! - `GET /api/v1/health` - Health check endpoint
//!
//! # Usage
//!
//! ```ignore
//! use provider_gateway::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(gateway, directory));
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, AppState, DispatchParams, ErrorResponse, HealthResponse};
pub use routes::create_router;
