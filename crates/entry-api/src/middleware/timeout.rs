//! Request deadline handling.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use entry_core::types::ApiErrorResponse;

/// Gives the bare 408 produced by the timeout layer the usual error body.
pub async fn timeout_envelope(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    let body = ApiErrorResponse {
        error: "REQUEST_TIMEOUT".to_string(),
        message: "the server took too long to process your request".to_string(),
        details: None,
    };
    (StatusCode::REQUEST_TIMEOUT, Json(body)).into_response()
}
