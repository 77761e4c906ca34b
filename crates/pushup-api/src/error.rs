//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Handler pattern:** Do the work in a function returning `Result<_, AppError>`
//! and wrap failures with [`HttpAppError::new`], which takes the detail policy
//! from the running `Config`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pushup_core::{AppError, Config, ErrorMetadata, LogLevel};
use pushup_processing::ProcessingError;
use pushup_storage::StorageError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: IntoResponse and AppError both live in other crates)
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    /// Outside production, non-sensitive errors carry `details` and `error_type`
    pub expose_details: bool,
}

impl HttpAppError {
    pub fn new(error: AppError, config: &Config) -> Self {
        Self {
            error,
            expose_details: !config.is_production(),
        }
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn error_body(app_error: &AppError, show_details: bool) -> ErrorResponse {
    ErrorResponse {
        error: app_error.client_message(),
        details: show_details.then(|| app_error.detailed_message()),
        error_type: show_details.then(|| app_error.error_type().to_string()),
        code: app_error.error_code().to_string(),
        recoverable: app_error.is_recoverable(),
        suggested_action: app_error.suggested_action().map(String::from),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let show_details = self.expose_details && !app_error.is_sensitive();

        (status, Json(error_body(app_error, show_details))).into_response()
    }
}

// Domain errors into AppError. Storage faults are server-side (500) except
// for keys built from bad client input.

pub(crate) fn app_error_from_storage(err: StorageError) -> AppError {
    match err {
        StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
        StorageError::ConfigError(msg) => AppError::Config(msg),
        StorageError::NotFound(key) => AppError::Storage(format!("object missing: {}", key)),
        StorageError::UploadFailed(msg)
        | StorageError::DeleteFailed(msg)
        | StorageError::BackendError(msg) => AppError::Storage(msg),
        StorageError::IoError(err) => AppError::Storage(format!("IO error: {}", err)),
    }
}

pub(crate) fn app_error_from_processing(err: ProcessingError) -> AppError {
    match err {
        ProcessingError::EmptyInput => AppError::InvalidInput(err.to_string()),
        ProcessingError::Decode(msg) => AppError::ImageProcessing(msg),
        ProcessingError::Encode(msg) => AppError::Internal(format!("encoding failed: {}", msg)),
    }
}

/// A blocking task that panicked or was cancelled.
pub(crate) fn app_error_from_join(err: tokio::task::JoinError, task: &str) -> AppError {
    AppError::from(anyhow::Error::new(err).context(format!("{} task failed", task)))
}
