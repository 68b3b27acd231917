//! Route definitions for the entry directory HTTP API.
//!
//! All routes are organized by domain and mounted under `/v1`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::http::StatusCode;
use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    let v1_routes = Router::new()
        .merge(health_routes())
        .merge(entry_routes())
        .merge(user_routes())
        .merge(token_routes());

    Router::new()
        .nest("/v1", v1_routes)
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(CatchPanicLayer::custom(middleware::panic::recover_panic))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(axum_middleware::map_response(
            middleware::timeout::timeout_envelope,
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Service health
fn health_routes() -> Router<AppState> {
    Router::new().route("/healthcheck", get(handlers::health::healthcheck))
}

/// Entry CRUD and search
fn entry_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/entries",
            get(handlers::entry::list_entries).post(handlers::entry::create_entry),
        )
        .route(
            "/entries/{id}",
            get(handlers::entry::show_entry)
                .patch(handlers::entry::update_entry)
                .delete(handlers::entry::delete_entry),
        )
}

/// User registration
fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(handlers::user::register_user))
}

/// Authentication tokens
fn token_routes() -> Router<AppState> {
    Router::new().route(
        "/tokens/authentication",
        post(handlers::token::create_authentication_token),
    )
}
