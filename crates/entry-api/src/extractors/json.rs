//! JSON body extractor with client-facing error messages.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use entry_core::error::AppError;

/// Like [`axum::Json`], but rejects with an [`AppError`] so malformed
/// bodies get the same error envelope as every other failure.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_error(rejection)),
        }
    }
}

fn json_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request("request body must be sent as application/json")
        }
        JsonRejection::JsonSyntaxError(e) => {
            AppError::bad_request(format!("body contains badly-formed JSON: {}", e.body_text()))
        }
        JsonRejection::JsonDataError(e) => {
            AppError::bad_request(format!("body contains invalid JSON: {}", e.body_text()))
        }
        other => AppError::bad_request(other.body_text()),
    }
}
