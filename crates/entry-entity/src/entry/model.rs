//! Directory entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::rules::{PHONE_RX, unique_modes};

/// An organization listed in the directory, with its contact details and
/// the modes in which it offers service.
///
/// `id`, `created_at` and `version` are assigned by the store. `version`
/// starts at 1 and is the only concurrency token for updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Entry {
    /// Server-assigned identifier.
    pub id: i64,
    /// Creation time. Not exposed to clients.
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    /// Organization name.
    #[validate(length(min = 1, max = 200, message = "must be provided and at most 200 characters"))]
    pub name: String,
    /// Level or category, e.g. `"primary"`.
    #[validate(length(min = 1, max = 200, message = "must be provided and at most 200 characters"))]
    pub level: String,
    /// Contact person.
    #[validate(length(min = 1, max = 200, message = "must be provided and at most 200 characters"))]
    pub contact: String,
    /// Contact phone number.
    #[validate(
        length(min = 1, message = "must be provided"),
        regex(path = *PHONE_RX, message = "must be a valid phone number")
    )]
    pub phone: String,
    /// Contact e-mail address.
    #[validate(
        length(min = 1, message = "must be provided"),
        email(message = "must be a valid email")
    )]
    pub email: String,
    /// Website URL.
    #[validate(
        length(min = 1, message = "must be provided"),
        url(message = "must be a valid url")
    )]
    pub website: String,
    /// Street address.
    #[validate(length(min = 1, max = 500, message = "must be provided and at most 500 characters"))]
    pub address: String,
    /// Service modes, e.g. `["online", "in-person"]`.
    #[validate(
        length(min = 1, max = 5, message = "must contain between 1 and 5 entries"),
        custom(function = "unique_modes")
    )]
    pub mode: Vec<String>,
    /// Optimistic concurrency version.
    pub version: i32,
}

/// Fields a client supplies to create an entry.
///
/// Missing fields deserialize as empty so they surface as validation
/// failures on the resulting [`Entry`] rather than as decode errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewEntry {
    /// Organization name.
    pub name: String,
    /// Level or category.
    pub level: String,
    /// Contact person.
    pub contact: String,
    /// Contact phone number.
    pub phone: String,
    /// Contact e-mail address.
    pub email: String,
    /// Website URL.
    pub website: String,
    /// Street address.
    pub address: String,
    /// Service modes.
    pub mode: Vec<String>,
}

impl From<NewEntry> for Entry {
    fn from(new: NewEntry) -> Self {
        Self {
            name: new.name,
            level: new.level,
            contact: new.contact,
            phone: new.phone,
            email: new.email,
            website: new.website,
            address: new.address,
            mode: new.mode,
            ..Self::default()
        }
    }
}
