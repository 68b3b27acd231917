//! Panic recovery for handlers.

use std::any::Any;

use axum::http::HeaderValue;
use axum::http::header::CONNECTION;
use axum::response::{IntoResponse, Response};

use entry_core::error::AppError;

/// Turns a handler panic into the standard 500 body and asks the client
/// to close the connection.
pub fn recover_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    let mut response = AppError::internal(format!("handler panicked: {detail}")).into_response();
    response
        .headers_mut()
        .insert(CONNECTION, HeaderValue::from_static("close"));
    response
}
