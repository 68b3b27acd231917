//! Entry handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use entry_core::error::AppError;
use entry_entity::entry::{EntryPatch, NewEntry};

use crate::dto::request::ListEntriesParams;
use crate::dto::response::{ApiResponse, EntryListResponse, EntryResponse, MessageResponse};
use crate::extractors::{AuthUser, EntryId, JsonBody};
use crate::middleware::permission::{require_read, require_write};
use crate::state::AppState;

/// Header carrying the version a client last observed.
pub const EXPECTED_VERSION_HEADER: &str = "x-expected-version";

/// GET /v1/entries
pub async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListEntriesParams>,
) -> Result<Json<ApiResponse<EntryListResponse>>, AppError> {
    require_read(&auth)?;

    let query = params.into_query()?;
    let (entries, metadata) = state.entry_service.list(&query).await?;

    Ok(Json(ApiResponse::ok(EntryListResponse { entries, metadata })))
}

/// POST /v1/entries
pub async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(req): JsonBody<NewEntry>,
) -> Result<Response, AppError> {
    require_write(&auth)?;

    let entry = state.entry_service.create(&auth, req).await?;

    let location = HeaderValue::from_str(&format!("/v1/entries/{}", entry.id))
        .map_err(|e| AppError::internal(format!("Invalid Location header: {e}")))?;

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(ApiResponse::ok(EntryResponse { entry })),
    )
        .into_response())
}

/// GET /v1/entries/{id}
pub async fn show_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    EntryId(id): EntryId,
) -> Result<Json<ApiResponse<EntryResponse>>, AppError> {
    require_read(&auth)?;

    let entry = state.entry_service.get(id).await?;
    Ok(Json(ApiResponse::ok(EntryResponse { entry })))
}

/// PATCH /v1/entries/{id}
pub async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    EntryId(id): EntryId,
    headers: HeaderMap,
    JsonBody(patch): JsonBody<EntryPatch>,
) -> Result<Json<ApiResponse<EntryResponse>>, AppError> {
    require_write(&auth)?;

    let expected_version = expected_version(&headers)?;
    let entry = state
        .entry_service
        .update(&auth, id, patch, expected_version)
        .await?;

    Ok(Json(ApiResponse::ok(EntryResponse { entry })))
}

/// DELETE /v1/entries/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    EntryId(id): EntryId,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    require_write(&auth)?;

    state.entry_service.delete(&auth, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "entry successfully deleted".to_string(),
    })))
}

/// Reads the optional `X-Expected-Version` header.
fn expected_version(headers: &HeaderMap) -> Result<Option<i32>, AppError> {
    headers
        .get(EXPECTED_VERSION_HEADER)
        .map(|value| {
            value
                .to_str()
                .ok()
                .and_then(|v| v.trim().parse::<i32>().ok())
                .ok_or_else(|| {
                    AppError::bad_request("X-Expected-Version must be an integer version")
                })
        })
        .transpose()
}
