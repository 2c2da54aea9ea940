//! Error to HTTP response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gridbudget_shared::AppError;
use serde_json::json;
use tracing::{debug, error};

/// Renders an error as `{"error": <code>, "message": <text>}`.
///
/// Server-side failures are logged and reported with a generic message.
pub fn error_response(err: impl Into<AppError>) -> Response {
    let err = err.into();
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if err.is_client_error() {
        debug!(error = %err, "Request rejected");
        err.to_string()
    } else {
        error!(error = %err, "Request failed");
        "An error occurred".to_string()
    };

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": message
        })),
    )
        .into_response()
}
