//! User registration handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use entry_core::error::AppError;
use entry_service::RegisterUser;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST /v1/users
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterUser>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    let user = state.user_service.register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse { user })),
    ))
}
