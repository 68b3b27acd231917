//! Permission code enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Permission codes stored in the `permissions` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// List and show entries.
    #[serde(rename = "entries:read")]
    EntriesRead,
    /// Create, update, and delete entries.
    #[serde(rename = "entries:write")]
    EntriesWrite,
}

impl Permission {
    /// Return the permission code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntriesRead => "entries:read",
            Self::EntriesWrite => "entries:write",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Permission {
    type Err = entry_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entries:read" => Ok(Self::EntriesRead),
            "entries:write" => Ok(Self::EntriesWrite),
            _ => Err(entry_core::AppError::validation(format!(
                "Invalid permission code: '{s}'. Expected one of: entries:read, entries:write"
            ))),
        }
    }
}

/// The permission codes held by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(Vec<String>);

impl Permissions {
    /// Wrap a list of codes.
    pub fn new(codes: Vec<String>) -> Self {
        Self(codes)
    }

    /// Whether `permission` is in the set.
    pub fn include(&self, permission: Permission) -> bool {
        self.0.iter().any(|code| code == permission.as_str())
    }

    /// The raw codes.
    pub fn codes(&self) -> &[String] {
        &self.0
    }

    /// Consume the set, returning the raw codes.
    pub fn into_codes(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for Permissions {
    fn from(codes: Vec<String>) -> Self {
        Self(codes)
    }
}
