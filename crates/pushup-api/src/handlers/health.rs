//! Liveness and health handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::constants::LIVENESS_MESSAGE;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Whether uploads can be accepted (a bucket is configured)
    pub storage_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service is running", body = String))
)]
pub async fn index() -> &'static str {
    LIVENESS_MESSAGE
}

/// Configuration-level health. Does not contact the storage backend.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Ready to accept uploads", body = HealthResponse),
        (status = 503, description = "No bucket configured", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = match state.storage {
        Some(ref storage) => HealthResponse {
            status: "healthy".to_string(),
            storage_configured: true,
            backend: Some(storage.backend_type().to_string()),
            bucket: Some(storage.bucket().to_string()),
        },
        None => HealthResponse {
            status: "degraded".to_string(),
            storage_configured: false,
            backend: None,
            bucket: None,
        },
    };

    let status = if response.storage_configured {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
