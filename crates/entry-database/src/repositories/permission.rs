//! Permission repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use entry_core::error::{AppError, ErrorKind};
use entry_core::result::AppResult;
use entry_entity::permission::Permissions;

use crate::timeout::bounded;

/// Permission grants held by users. Grants are written alongside the
/// user row by [`UserStore::insert`](crate::repositories::UserStore::insert).
#[async_trait]
pub trait PermissionStore: Send + Sync + 'static {
    /// All permission codes granted to a user.
    async fn get_all_for_user(&self, user_id: i64) -> AppResult<Permissions>;
}

/// Repository over `permissions` and `users_permissions`.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl PermissionStore for PermissionRepository {
    async fn get_all_for_user(&self, user_id: i64) -> AppResult<Permissions> {
        let codes: Vec<String> = bounded(self.query_timeout, "get user permissions", async {
            sqlx::query_scalar(
                "SELECT permissions.code \
                 FROM permissions \
                 INNER JOIN users_permissions ON users_permissions.permission_id = permissions.id \
                 WHERE users_permissions.user_id = $1 \
                 ORDER BY permissions.code",
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load user permissions", e)
            })
        })
        .await?;

        Ok(Permissions::new(codes))
    }
}
