//! Partial updates to an entry.

use serde::{Deserialize, Serialize};

use super::model::Entry;

/// Fields a client may change on an existing entry. Absent fields keep
/// their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryPatch {
    /// New organization name.
    pub name: Option<String>,
    /// New level or category.
    pub level: Option<String>,
    /// New contact person.
    pub contact: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New e-mail address.
    pub email: Option<String>,
    /// New website URL.
    pub website: Option<String>,
    /// New street address.
    pub address: Option<String>,
    /// Replacement mode list.
    pub mode: Option<Vec<String>>,
}

impl EntryPatch {
    /// Overwrite the fields present in this patch onto `entry`.
    ///
    /// Identity and version are never touched; the result still needs
    /// validating before it is stored.
    pub fn apply(self, entry: &mut Entry) {
        if let Some(name) = self.name {
            entry.name = name;
        }
        if let Some(level) = self.level {
            entry.level = level;
        }
        if let Some(contact) = self.contact {
            entry.contact = contact;
        }
        if let Some(phone) = self.phone {
            entry.phone = phone;
        }
        if let Some(email) = self.email {
            entry.email = email;
        }
        if let Some(website) = self.website {
            entry.website = website;
        }
        if let Some(address) = self.address {
            entry.address = address;
        }
        if let Some(mode) = self.mode {
            entry.mode = mode;
        }
    }
}
