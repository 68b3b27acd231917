//! User repository implementation.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use entry_core::error::{AppError, ErrorKind};
use entry_core::result::AppResult;
use entry_entity::user::{NewUser, User};

use crate::timeout::bounded;

/// Unique constraint on `users.email`.
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// User lookups needed by registration and authentication.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a user together with its initial permission grants, all or
    /// nothing. Unknown permission codes are ignored. A duplicate e-mail is
    /// reported as a validation failure on the `email` field.
    async fn insert(&self, user: NewUser, permissions: &[String]) -> AppResult<User>;

    /// Find a user by e-mail (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Repository for user persistence.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

/// Validation error for an e-mail address that is already registered.
pub fn duplicate_email() -> AppError {
    let mut fields = BTreeMap::new();
    fields.insert(
        "email".to_string(),
        "a user with this email address already exists".to_string(),
    );
    AppError::failed_validation(fields)
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: NewUser, permissions: &[String]) -> AppResult<User> {
        bounded(self.query_timeout, "insert user", async {
            let mut tx = self.pool.begin().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
            })?;

            let stored = sqlx::query_as::<_, User>(
                "INSERT INTO users (name, email, password_hash, activated) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, created_at, name, email::text AS email, password_hash, activated, version",
            )
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.activated)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) =>
                {
                    duplicate_email()
                }
                _ => {
                    warn!(error = %e, "Failed to insert user");
                    AppError::with_source(ErrorKind::Database, "Failed to insert user", e)
                }
            })?;

            sqlx::query(
                "INSERT INTO users_permissions (user_id, permission_id) \
                 SELECT $1, permissions.id FROM permissions WHERE permissions.code = ANY($2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(stored.id)
            .bind(permissions)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                warn!(error = %e, user_id = stored.id, "Failed to grant user permissions");
                AppError::with_source(ErrorKind::Database, "Failed to grant user permissions", e)
            })?;

            tx.commit().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to commit user insert", e)
            })?;

            Ok(stored)
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        bounded(self.query_timeout, "find user by email", async {
            sqlx::query_as::<_, User>(
                "SELECT id, created_at, name, email::text AS email, password_hash, activated, version \
                 FROM users WHERE email = $1::citext",
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
        })
        .await
    }
}
