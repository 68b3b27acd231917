//! Sorting types for list endpoints.

use serde::{Deserialize, Serialize};

/// Prefix on a sort key that requests descending order.
pub const DESCENDING_MARKER: char = '-';

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Derive the direction from a raw sort key such as `-name`.
    pub fn from_sort_key(key: &str) -> Self {
        if key.starts_with(DESCENDING_MARKER) {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sort_key() {
        assert_eq!(SortDirection::from_sort_key("name"), SortDirection::Asc);
        assert_eq!(SortDirection::from_sort_key("-name"), SortDirection::Desc);
        assert_eq!(SortDirection::from_sort_key(""), SortDirection::Asc);
    }

    #[test]
    fn test_as_sql() {
        assert_eq!(SortDirection::Asc.as_sql(), "ASC");
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
    }
}
