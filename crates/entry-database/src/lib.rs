//! # entry-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for entries, users, and permissions.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod timeout;

pub use connection::DatabasePool;
pub use repositories::{
    EntryRepository, EntryStore, PermissionRepository, PermissionStore, UserRepository, UserStore,
};
