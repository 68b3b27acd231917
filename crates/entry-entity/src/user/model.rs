//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered API user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Server-assigned identifier.
    pub id: i64,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// Display name.
    pub name: String,
    /// Unique, case-insensitive e-mail address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account may authenticate.
    pub activated: bool,
    /// Optimistic concurrency version.
    pub version: i32,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// E-mail address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Initial activation state.
    pub activated: bool,
}
