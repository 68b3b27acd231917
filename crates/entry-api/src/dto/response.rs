//! Response DTOs.

use serde::{Deserialize, Serialize};

use entry_auth::jwt::AuthToken;
use entry_core::types::Metadata;
use entry_entity::entry::Entry;
use entry_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A single entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryResponse {
    /// The entry.
    pub entry: Entry,
}

/// A page of entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryListResponse {
    /// Entries on this page.
    pub entries: Vec<Entry>,
    /// Pagination details; empty when nothing matched.
    pub metadata: Metadata,
}

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// The user, without credentials.
    pub user: User,
}

/// An issued authentication token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Token and expiry.
    pub authentication_token: AuthToken,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"available"`.
    pub status: String,
    /// Operating environment.
    pub environment: String,
    /// Crate version.
    pub version: String,
}
