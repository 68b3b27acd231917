//! # entry-service
//!
//! Business logic service layer for the entry directory. Each service
//! orchestrates repositories and authentication to implement one
//! application-level use case.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod entry;
pub mod user;

pub use context::RequestContext;
pub use entry::{EntryQuery, EntryService};
pub use user::{RegisterUser, UserService};
