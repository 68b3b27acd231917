//! Generic repository trait for version-tracked records.

use async_trait::async_trait;

use crate::result::AppResult;

/// CRUD over records that carry a server-assigned `i64` identifier and an
/// optimistic-concurrency version counter.
///
/// Entity-specific queries (search, lookups by other keys) live on
/// extension traits or the concrete repository structs.
#[async_trait]
pub trait VersionedRepository<Entity>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
{
    /// Persist a new record, writing the assigned id, timestamp and
    /// initial version back into `entity`.
    async fn insert(&self, entity: &mut Entity) -> AppResult<()>;

    /// Fetch a record by id. Ids below 1 are reported as not found.
    async fn get(&self, id: i64) -> AppResult<Entity>;

    /// Conditionally update a record at the version it carries, writing
    /// the new version back into `entity`.
    ///
    /// Returns an edit-conflict error when no row matched the id and
    /// version pair.
    async fn update(&self, entity: &mut Entity) -> AppResult<()>;

    /// Hard-delete a record by id.
    async fn delete(&self, id: i64) -> AppResult<()>;
}
