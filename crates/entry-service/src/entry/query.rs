//! Parameters of an entry search.

use entry_core::types::Filters;
use entry_core::types::pagination::DEFAULT_PAGE_SIZE;
use entry_entity::entry::SORT_SAFELIST;

/// Sort key used when the caller does not supply one.
pub const DEFAULT_SORT: &str = "id";

/// A list request: text filters, mode filter, and paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    /// Full-text filter on the name. Empty matches everything.
    pub name: String,
    /// Full-text filter on the level. Empty matches everything.
    pub level: String,
    /// Modes every result must carry. Empty matches everything.
    pub mode: Vec<String>,
    /// Page, page size, and sort key.
    pub filters: Filters,
}

impl Default for EntryQuery {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: String::new(),
            mode: Vec::new(),
            filters: Filters::new(1, DEFAULT_PAGE_SIZE, DEFAULT_SORT, SORT_SAFELIST),
        }
    }
}
