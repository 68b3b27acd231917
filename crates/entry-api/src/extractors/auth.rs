//! `AuthUser` extractor pulls the bearer token from the Authorization
//! header, validates it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};

use entry_auth::jwt::Claims;
use entry_core::error::AppError;
use entry_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    context: RequestContext,
    claims: Claims,
}

impl AuthUser {
    /// Returns the validated token claims.
    pub fn claims(&self) -> &Claims {
        &self.claims
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

/// A 401 that tells the client which scheme to use.
#[derive(Debug)]
pub struct AuthRejection(AppError);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        response
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AuthRejection(AppError::unauthorized(
                    "you must be authenticated to access this resource",
                ))
            })?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AuthRejection(AppError::unauthorized(
                    "invalid or missing authentication token",
                ))
            })?;

        let claims = state.jwt_decoder.decode(token).map_err(AuthRejection)?;

        Ok(Self {
            context: RequestContext::from_claims(&claims),
            claims,
        })
    }
}
