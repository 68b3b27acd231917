//! JWT claims structure used in authentication tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use entry_entity::permission::{Permission, Permissions};

/// Claims payload embedded in every authentication token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the user ID), carried as a decimal string on the wire.
    #[serde(with = "subject")]
    pub sub: i64,
    /// E-mail address at the time of issuance.
    pub email: String,
    /// Permission codes held at the time of issuance.
    pub permissions: Permissions,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token ID.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> i64 {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Whether the token grants `permission`.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.include(permission)
    }
}

/// `sub` is a StringOrURI per RFC 7519, so the numeric user id travels as text.
mod subject {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| D::Error::custom(format!("subject is not a user id: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: i64) -> Claims {
        Claims {
            sub,
            email: "alice@example.com".to_string(),
            permissions: Permissions::default(),
            iat: 0,
            exp: 60,
            jti: Uuid::nil(),
        }
    }

    #[test]
    fn test_subject_serialized_as_string() {
        let value = serde_json::to_value(claims(42)).unwrap();
        assert_eq!(value["sub"], serde_json::json!("42"));

        let back: Claims = serde_json::from_value(value).unwrap();
        assert_eq!(back.user_id(), 42);
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let mut value = serde_json::to_value(claims(7)).unwrap();
        value["sub"] = serde_json::json!("alice");
        assert!(serde_json::from_value::<Claims>(value).is_err());
    }
}
