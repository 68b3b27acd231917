//! Typed path parameter extractors.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use entry_core::error::AppError;

/// A positive entry identifier taken from the `{id}` path segment.
///
/// Anything that is not an integer ≥ 1 is reported as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryId(pub i64);

/// Parses a positive identifier from a path segment.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| AppError::not_found("the requested resource could not be found"))
}

impl<S> FromRequestParts<S> for EntryId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found("the requested resource could not be found"))?;
        parse_id(&raw).map(Self)
    }
}
