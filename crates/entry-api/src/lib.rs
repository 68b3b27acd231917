//! # entry-api
//!
//! HTTP API layer for the entry directory built on Axum.
//!
//! Provides the `/v1` REST endpoints, middleware (request logging, rate
//! limiting, CORS), extractors, and DTOs.

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
