//! Repository implementations for entries, users, and permissions.

pub mod entry;
pub mod permission;
pub mod user;

pub use entry::{EntryRepository, EntryStore};
pub use permission::{PermissionRepository, PermissionStore};
pub use user::{UserRepository, UserStore};
