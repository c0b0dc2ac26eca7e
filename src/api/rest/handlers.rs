//! # REST Handlers
//!
//! Request handlers, shared state and response bodies.

use crate::application::error::ApplicationError;
use crate::application::services::{GatewayResponse, ProviderDirectory, ProviderGateway};
use crate::domain::entities::{ProviderCupid, ProviderRecord, QuoteRequest};
use crate::domain::value_objects::ProviderId;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Shared state of the REST handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Quote dispatch.
    pub gateway: ProviderGateway,
    /// Provider listings.
    pub directory: ProviderDirectory,
}

impl AppState {
    /// Creates handler state.
    #[must_use]
    pub fn new(gateway: ProviderGateway, directory: ProviderDirectory) -> Self {
        Self { gateway, directory }
    }
}

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. `INFRASTRUCTURE_ERROR`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    /// Creates an error body.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Health check body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Number of registered provider adapters.
    pub providers: usize,
}

/// Query parameters of `POST /api/v1/quotes`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DispatchParams {
    /// Return raw provider records instead of priced quotes.
    #[serde(default)]
    pub debug: bool,
}

/// An [`ApplicationError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        Self(error)
    }
}

impl ApiError {
    /// Returns the status code and error code for this error.
    #[must_use]
    pub fn status(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            ApplicationError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApplicationError::Provider(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_DATA_ERROR"),
            ApplicationError::Domain(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DATA_INTEGRITY_ERROR")
            }
            ApplicationError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INFRASTRUCTURE_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        error!(code, error = %self.0, "request failed");
        (status, Json(ErrorResponse::new(code, self.0.to_string()))).into_response()
    }
}

/// `POST /api/v1/quotes`
///
/// # Errors
///
/// Returns [`ApiError`] when the body is not a quote request or the gateway
/// fails.
pub async fn dispatch_quote(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DispatchParams>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<GatewayResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApplicationError::validation(rejection.body_text()))?;
    let response = state.gateway.dispatch(&request, params.debug).await?;
    Ok(Json(response))
}

/// `GET /api/v1/providers`
///
/// # Errors
///
/// Returns [`ApiError`] when the provider store fails.
pub async fn list_active_providers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProviderRecord>>, ApiError> {
    Ok(Json(state.directory.list_active_providers().await?))
}

/// `GET /api/v1/providers/all`
///
/// # Errors
///
/// Returns [`ApiError`] when the provider store fails.
pub async fn list_all_providers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProviderRecord>>, ApiError> {
    Ok(Json(state.directory.list_all_providers().await?))
}

/// `GET /api/v1/providers/{id}/cupids`
///
/// # Errors
///
/// Returns [`ApiError`] when the cupid store fails.
pub async fn get_provider_cupids(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ProviderCupid>>, ApiError> {
    let cupids = state
        .directory
        .get_provider_cupids(&ProviderId::new(id))
        .await?;
    Ok(Json(cupids))
}

/// `GET /api/v1/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers: state.gateway.registry().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::InfrastructureError;
    use crate::infrastructure::providers::ProviderError;

    #[test]
    fn error_status_mapping() {
        let cases = [
            (ApplicationError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                ApplicationError::from(InfrastructureError::database("down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApplicationError::from(ProviderError::protocol("missing costs")),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(ApiError(error).status().0, expected);
        }
    }

    #[test]
    fn error_response_carries_code() {
        let response = ApiError(ApplicationError::validation("bad")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn debug_defaults_to_false() {
        let params: DispatchParams = serde_json::from_str("{}").unwrap_or_default();
        assert!(!params.debug);
    }
}
