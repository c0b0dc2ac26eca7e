//! # REST Routes

use crate::api::rest::handlers::{
    AppState, dispatch_quote, get_provider_cupids, health, list_active_providers,
    list_all_providers,
};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the `/api/v1` router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/quotes", post(dispatch_quote))
        .route("/providers", get(list_active_providers))
        .route("/providers/all", get(list_all_providers))
        .route("/providers/{id}/cupids", get(get_provider_cupids))
        .route("/health", get(health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
