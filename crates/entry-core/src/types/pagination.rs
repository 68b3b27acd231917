//! Pagination, sorting, and result metadata for list endpoints.
//!
//! [`Filters`] carries the raw page/sort request together with the
//! allow-list of sortable columns supplied by the calling endpoint. The
//! sort column is the one part of a list query that cannot be bound as a
//! parameter, so it is only ever resolved through that allow-list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::sorting::{DESCENDING_MARKER, SortDirection};

/// Default page size.
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// Maximum page size.
pub const MAX_PAGE_SIZE: i64 = 100;
/// Maximum page number.
pub const MAX_PAGE: i64 = 10_000_000;

/// Page, page size, and sort key for a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    /// Page number (1-based).
    pub page: i64,
    /// Number of items per page.
    pub page_size: i64,
    /// Requested sort key, optionally prefixed with `-` for descending.
    pub sort: String,
    /// Sort keys the caller accepts, with and without the `-` prefix.
    pub sort_safelist: &'static [&'static str],
}

impl Filters {
    /// Create a new filter set.
    pub fn new(
        page: i64,
        page_size: i64,
        sort: impl Into<String>,
        sort_safelist: &'static [&'static str],
    ) -> Self {
        Self {
            page,
            page_size,
            sort: sort.into(),
            sort_safelist,
        }
    }

    /// Check page bounds and sort membership, collecting every failure.
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = BTreeMap::new();

        if self.page < 1 {
            errors.insert("page".to_string(), "must be greater than zero".to_string());
        } else if self.page > MAX_PAGE {
            errors.insert(
                "page".to_string(),
                "must be a maximum of 10 million".to_string(),
            );
        }

        if self.page_size < 1 {
            errors.insert(
                "page_size".to_string(),
                "must be greater than zero".to_string(),
            );
        } else if self.page_size > MAX_PAGE_SIZE {
            errors.insert(
                "page_size".to_string(),
                format!("must be a maximum of {MAX_PAGE_SIZE}"),
            );
        }

        if !self.sort_safelist.contains(&self.sort.as_str()) {
            errors.insert("sort".to_string(), "invalid sort value".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::failed_validation(errors))
        }
    }

    /// Resolve the requested sort key to a column name from the allow-list.
    ///
    /// The returned literal always comes from `sort_safelist`, never from
    /// the request. A key outside the allow-list means [`Filters::validate`]
    /// was skipped and is reported as an internal error.
    pub fn sort_column(&self) -> AppResult<&'static str> {
        self.sort_safelist
            .iter()
            .find(|safe| **safe == self.sort)
            .map(|safe| safe.trim_start_matches(DESCENDING_MARKER))
            .ok_or_else(|| AppError::internal(format!("unsafe sort parameter: {}", self.sort)))
    }

    /// Direction requested by the sort key.
    pub fn sort_direction(&self) -> SortDirection {
        SortDirection::from_sort_key(&self.sort)
    }

    /// The SQL `LIMIT` value.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// The SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0).saturating_mul(self.page_size)
    }
}

/// Pagination details returned alongside a page of results.
///
/// All fields are zero when the query matched nothing, and zero fields
/// are omitted from the serialized form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Page that was returned.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub current_page: i64,
    /// Items per page.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub page_size: i64,
    /// Always 1 when there are results.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub first_page: i64,
    /// Last page holding results.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_page: i64,
    /// Matching records across all pages.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_records: i64,
}

impl Metadata {
    /// Compute metadata for a result set of `total_records` rows.
    pub fn calculate(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records <= 0 {
            return Self::default();
        }

        let page_size_divisor = page_size.max(1);
        Self {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: (total_records + page_size_divisor - 1) / page_size_divisor,
            total_records,
        }
    }

    /// Whether the metadata describes an empty result set.
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}
