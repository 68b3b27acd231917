//! Authentication token handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use entry_core::error::AppError;

use crate::dto::request::CreateTokenRequest;
use crate::dto::response::{ApiResponse, TokenResponse};
use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST /v1/tokens/authentication
pub async fn create_authentication_token(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateTokenRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenResponse>>), AppError> {
    let token = state
        .user_service
        .authenticate(&req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(TokenResponse {
            authentication_token: token,
        })),
    ))
}
