//! Core type definitions used across the workspace.

pub mod pagination;
pub mod response;
pub mod sorting;

pub use pagination::{Filters, Metadata};
pub use response::ApiErrorResponse;
pub use sorting::SortDirection;
