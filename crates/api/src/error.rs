//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mediator::DispatchError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// A dispatched request failed.
    Dispatch(DispatchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => {
                let body = serde_json::json!({ "error": msg });
                (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
            }
            ApiError::Dispatch(err) => dispatch_error_to_response(err),
        }
    }
}

fn dispatch_error_to_response(err: DispatchError) -> Response {
    match err {
        DispatchError::Validation(violations) => {
            let body = serde_json::json!({
                "error": "validation failed",
                "violations": violations,
            });
            (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
        }
        DispatchError::Store(_) | DispatchError::Projection { .. } | DispatchError::Unrouted { .. } => {
            tracing::error!(error = %err, "request failed");
            let body = serde_json::json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        ApiError::Dispatch(err)
    }
}
