//! HTTP request handlers.

pub mod entry;
pub mod health;
pub mod token;
pub mod user;

use axum::Json;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use entry_core::error::AppError;
use entry_core::types::ApiErrorResponse;

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "No route matched");
    AppError::not_found("the requested resource could not be found")
}

/// Fallback for known routes called with an unsupported method.
pub async fn method_not_allowed(method: Method) -> Response {
    let body = ApiErrorResponse {
        error: "METHOD_NOT_ALLOWED".to_string(),
        message: format!("the {method} method is not supported for this resource"),
        details: None,
    };
    (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response()
}
