//! Entry repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, warn};

use entry_core::error::{AppError, ErrorKind};
use entry_core::result::AppResult;
use entry_core::traits::VersionedRepository;
use entry_core::types::{Filters, Metadata};
use entry_entity::entry::Entry;

use crate::timeout::bounded;

/// Entry persistence plus filtered, paginated search.
#[async_trait]
pub trait EntryStore: VersionedRepository<Entry> {
    /// Search entries.
    ///
    /// `name` and `level` are full-text filters and `mode` is a
    /// containment filter; an empty value disables that filter. Returns
    /// the requested page together with its pagination metadata.
    async fn get_all(
        &self,
        name: &str,
        level: &str,
        mode: &[String],
        filters: &Filters,
    ) -> AppResult<(Vec<Entry>, Metadata)>;
}

/// Row shape of the search query: an entry plus the windowed total.
#[derive(Debug, FromRow)]
struct EntryRow {
    total_records: i64,
    #[sqlx(flatten)]
    entry: Entry,
}

/// Repository for entry CRUD and search.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl EntryRepository {
    /// Create a new entry repository.
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

fn not_found() -> AppError {
    AppError::not_found("the requested resource could not be found")
}

#[async_trait]
impl VersionedRepository<Entry> for EntryRepository {
    async fn insert(&self, entry: &mut Entry) -> AppResult<()> {
        let (id, created_at, version): (i64, DateTime<Utc>, i32) =
            bounded(self.query_timeout, "insert entry", async {
                sqlx::query_as(
                    "INSERT INTO entries (name, level, contact, phone, email, website, address, mode) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
                     RETURNING id, created_at, version",
                )
                .bind(&entry.name)
                .bind(&entry.level)
                .bind(&entry.contact)
                .bind(&entry.phone)
                .bind(&entry.email)
                .bind(&entry.website)
                .bind(&entry.address)
                .bind(&entry.mode)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    warn!(error = %e, "Failed to insert entry");
                    AppError::with_source(ErrorKind::Database, "Failed to insert entry", e)
                })
            })
            .await?;

        entry.id = id;
        entry.created_at = created_at;
        entry.version = version;
        Ok(())
    }

    async fn get(&self, id: i64) -> AppResult<Entry> {
        if id < 1 {
            return Err(not_found());
        }

        bounded(self.query_timeout, "get entry", async {
            sqlx::query_as::<_, Entry>(
                "SELECT id, created_at, name, level, contact, phone, email, website, address, mode, version \
                 FROM entries WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(entry_id = id, error = %e, "Failed to get entry");
                AppError::with_source(ErrorKind::Database, "Failed to get entry", e)
            })?
            .ok_or_else(not_found)
        })
        .await
    }

    async fn update(&self, entry: &mut Entry) -> AppResult<()> {
        let new_version: Option<i32> = bounded(self.query_timeout, "update entry", async {
            sqlx::query_scalar(
                "UPDATE entries \
                 SET name = $1, level = $2, contact = $3, phone = $4, email = $5, \
                     website = $6, address = $7, mode = $8, version = version + 1 \
                 WHERE id = $9 AND version = $10 \
                 RETURNING version",
            )
            .bind(&entry.name)
            .bind(&entry.level)
            .bind(&entry.contact)
            .bind(&entry.phone)
            .bind(&entry.email)
            .bind(&entry.website)
            .bind(&entry.address)
            .bind(&entry.mode)
            .bind(entry.id)
            .bind(entry.version)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(entry_id = entry.id, error = %e, "Failed to update entry");
                AppError::with_source(ErrorKind::Database, "Failed to update entry", e)
            })
        })
        .await?;

        match new_version {
            Some(version) => {
                entry.version = version;
                Ok(())
            }
            None => {
                debug!(
                    entry_id = entry.id,
                    version = entry.version,
                    "Entry update lost an edit conflict"
                );
                Err(AppError::edit_conflict())
            }
        }
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if id < 1 {
            return Err(not_found());
        }

        let result = bounded(self.query_timeout, "delete entry", async {
            sqlx::query("DELETE FROM entries WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    warn!(entry_id = id, error = %e, "Failed to delete entry");
                    AppError::with_source(ErrorKind::Database, "Failed to delete entry", e)
                })
        })
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}

#[async_trait]
impl EntryStore for EntryRepository {
    async fn get_all(
        &self,
        name: &str,
        level: &str,
        mode: &[String],
        filters: &Filters,
    ) -> AppResult<(Vec<Entry>, Metadata)> {
        // Only allow-listed literals reach the ORDER BY clause.
        let query = format!(
            "SELECT COUNT(*) OVER() AS total_records, \
                    id, created_at, name, level, contact, phone, email, website, address, mode, version \
             FROM entries \
             WHERE (to_tsvector('simple', name) @@ plainto_tsquery('simple', $1) OR $1 = '') \
               AND (to_tsvector('simple', level) @@ plainto_tsquery('simple', $2) OR $2 = '') \
               AND (mode @> $3::text[] OR $3::text[] = '{{}}') \
             ORDER BY {} {}, id ASC \
             LIMIT $4 OFFSET $5",
            filters.sort_column()?,
            filters.sort_direction().as_sql(),
        );

        let rows = bounded(self.query_timeout, "list entries", async {
            sqlx::query_as::<_, EntryRow>(&query)
                .bind(name)
                .bind(level)
                .bind(mode)
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    warn!(error = %e, "Failed to list entries");
                    AppError::with_source(ErrorKind::Database, "Failed to list entries", e)
                })
        })
        .await?;

        let total_records = rows.first().map(|row| row.total_records).unwrap_or(0);
        let metadata = Metadata::calculate(total_records, filters.page, filters.page_size);
        let entries = rows.into_iter().map(|row| row.entry).collect();

        Ok((entries, metadata))
    }
}
