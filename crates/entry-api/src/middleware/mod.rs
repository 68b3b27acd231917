//! Axum middleware stack.

pub mod cors;
pub mod logging;
pub mod panic;
pub mod permission;
pub mod rate_limit;
pub mod timeout;
