//! # entry-core
//!
//! Core crate for the entry directory service. Contains configuration
//! schemas, the unified error system, pagination/sorting types, and the
//! storage traits implemented by the database crate.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
