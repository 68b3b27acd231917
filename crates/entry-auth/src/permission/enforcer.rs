//! Checks whether an authenticated caller holds a required permission.

use entry_core::error::AppError;
use entry_entity::permission::Permission;

use crate::jwt::Claims;

/// Enforces permission codes carried in authentication claims.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionEnforcer;

impl PermissionEnforcer {
    /// Returns `Err(Forbidden)` unless `claims` grant `permission`.
    pub fn require(claims: &Claims, permission: Permission) -> Result<(), AppError> {
        if claims.has_permission(permission) {
            Ok(())
        } else {
            tracing::debug!(
                user_id = claims.sub,
                permission = %permission,
                "Permission denied"
            );
            Err(AppError::forbidden(
                "your user account doesn't have the necessary permissions to access this resource",
            ))
        }
    }
}
