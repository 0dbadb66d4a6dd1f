//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Error returned by handlers, rendered as `{ "success": false, "error": ... }`
#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    InternalError(String),
}

impl From<feedtriage_core::Error> for AppError {
    fn from(err: feedtriage_core::Error) -> Self {
        match err {
            feedtriage_core::Error::Validation(msg) => AppError::InvalidRequest(msg),
            feedtriage_core::Error::NotFound(msg) => AppError::NotFound(msg),
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, kind) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg, "invalid_request"),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "not_found"),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "unauthorized"),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, "forbidden"),
            AppError::InternalError(msg) => {
                error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "internal",
                )
            }
        };

        metrics::counter!("feedtriage_errors_total", "type" => kind).increment(1);

        let body = json!({
            "success": false,
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}
