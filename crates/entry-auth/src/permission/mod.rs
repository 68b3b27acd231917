//! Permission-code enforcement.

pub mod enforcer;

pub use enforcer::PermissionEnforcer;
