//! Request DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use entry_core::error::AppError;
use entry_core::types::Filters;
use entry_core::types::pagination::DEFAULT_PAGE_SIZE;
use entry_entity::entry::SORT_SAFELIST;
use entry_service::entry::query::DEFAULT_SORT;
use entry_service::EntryQuery;

/// Query string of `GET /v1/entries`.
///
/// Every field is kept as text so that non-integer paging values are
/// reported as field validation errors rather than decode failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListEntriesParams {
    /// Full-text name filter.
    pub name: Option<String>,
    /// Full-text level filter.
    pub level: Option<String>,
    /// Comma-separated modes every result must carry.
    pub mode: Option<String>,
    /// Page number (default 1).
    pub page: Option<String>,
    /// Page size (default 20).
    pub page_size: Option<String>,
    /// Sort key (default `id`).
    pub sort: Option<String>,
}

impl ListEntriesParams {
    /// Converts to a service query, applying defaults.
    pub fn into_query(self) -> Result<EntryQuery, AppError> {
        let mut errors = BTreeMap::new();
        let page = read_int(self.page, 1, "page", &mut errors);
        let page_size = read_int(self.page_size, DEFAULT_PAGE_SIZE, "page_size", &mut errors);
        if !errors.is_empty() {
            return Err(AppError::failed_validation(errors));
        }

        let mode = self
            .mode
            .map(|csv| {
                csv.split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(EntryQuery {
            name: self.name.unwrap_or_default(),
            level: self.level.unwrap_or_default(),
            mode,
            filters: Filters::new(
                page,
                page_size,
                self.sort.unwrap_or_else(|| DEFAULT_SORT.to_string()),
                SORT_SAFELIST,
            ),
        })
    }
}

fn read_int(
    raw: Option<String>,
    default: i64,
    field: &str,
    errors: &mut BTreeMap<String, String>,
) -> i64 {
    match raw.as_deref().map(str::trim) {
        None | Some("") => default,
        Some(value) => value.parse().unwrap_or_else(|_| {
            errors.insert(field.to_string(), "must be an integer value".to_string());
            default
        }),
    }
}

/// Body of `POST /v1/tokens/authentication`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTokenRequest {
    /// Registered e-mail address.
    pub email: String,
    /// Account password.
    pub password: String,
}
