//! Authentication token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use entry_core::config::AuthConfig;
use entry_core::error::AppError;
use entry_entity::permission::Permissions;

use super::claims::Claims;

/// Creates signed HS256 authentication tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl_hours: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

/// A freshly issued token and its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// Signed token to send as `Authorization: Bearer <token>`.
    pub token: String,
    /// When the token stops being accepted.
    pub expiry: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_hours: config.token_ttl_hours as i64,
        }
    }

    /// Issue a token for a user carrying their current permissions.
    pub fn generate_token(
        &self,
        user_id: i64,
        email: &str,
        permissions: Permissions,
    ) -> Result<AuthToken, AppError> {
        let now = Utc::now();
        let expiry = now + chrono::Duration::hours(self.ttl_hours);

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            permissions,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(AuthToken { token, expiry })
    }
}
