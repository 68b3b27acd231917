//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /v1/healthcheck
pub async fn healthcheck(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "available".to_string(),
        environment: state.config.server.env.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
