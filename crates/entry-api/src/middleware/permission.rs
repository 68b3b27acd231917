//! Permission guards used by entry handlers.

use entry_auth::permission::PermissionEnforcer;
use entry_core::error::AppError;
use entry_entity::permission::Permission;

use crate::extractors::AuthUser;

/// Checks that the caller may list and show entries.
pub fn require_read(auth: &AuthUser) -> Result<(), AppError> {
    PermissionEnforcer::require(auth.claims(), Permission::EntriesRead)
}

/// Checks that the caller may create, update, and delete entries.
pub fn require_write(auth: &AuthUser) -> Result<(), AppError> {
    PermissionEnforcer::require(auth.claims(), Permission::EntriesWrite)
}
