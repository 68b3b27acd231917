//! Entry create, read, update, delete, and search.

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use entry_core::error::AppError;
use entry_core::types::Metadata;
use entry_database::EntryStore;
use entry_entity::entry::{Entry, EntryPatch, NewEntry};

use super::query::EntryQuery;
use crate::context::RequestContext;

/// Orchestrates entry validation and persistence.
#[derive(Clone)]
pub struct EntryService {
    store: Arc<dyn EntryStore>,
}

impl std::fmt::Debug for EntryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryService").finish_non_exhaustive()
    }
}

impl EntryService {
    /// Creates a new entry service.
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Validate and store a new entry.
    pub async fn create(&self, ctx: &RequestContext, new: NewEntry) -> Result<Entry, AppError> {
        let mut entry = Entry::from(new);
        entry.validate()?;

        self.store.insert(&mut entry).await?;

        info!(entry_id = entry.id, user_id = ctx.user_id, "Entry created");
        Ok(entry)
    }

    /// Fetch one entry.
    pub async fn get(&self, id: i64) -> Result<Entry, AppError> {
        self.store.get(id).await
    }

    /// Apply a partial update to an entry.
    ///
    /// When `expected_version` is given it must match the stored version,
    /// otherwise the update is rejected as an edit conflict without
    /// touching the store. A concurrent writer between the read and the
    /// write surfaces as the same error from the store.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        patch: EntryPatch,
        expected_version: Option<i32>,
    ) -> Result<Entry, AppError> {
        let mut entry = self.store.get(id).await?;

        if let Some(expected) = expected_version {
            if expected != entry.version {
                debug!(
                    entry_id = id,
                    expected,
                    stored = entry.version,
                    "Expected version does not match"
                );
                return Err(AppError::edit_conflict());
            }
        }

        patch.apply(&mut entry);
        entry.validate()?;

        self.store.update(&mut entry).await?;

        info!(
            entry_id = id,
            version = entry.version,
            user_id = ctx.user_id,
            "Entry updated"
        );
        Ok(entry)
    }

    /// Permanently remove an entry.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<(), AppError> {
        self.store.delete(id).await?;
        info!(entry_id = id, user_id = ctx.user_id, "Entry deleted");
        Ok(())
    }

    /// Search entries after validating the paging parameters.
    pub async fn list(&self, query: &EntryQuery) -> Result<(Vec<Entry>, Metadata), AppError> {
        query.filters.validate()?;
        self.store
            .get_all(&query.name, &query.level, &query.mode, &query.filters)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use entry_core::error::ErrorKind;
    use entry_core::result::AppResult;
    use entry_core::traits::VersionedRepository;
    use entry_core::types::Filters;
    use entry_entity::entry::SORT_SAFELIST;

    use super::*;

    /// In-memory store with the same not-found and conflict rules as the
    /// PostgreSQL repository. Searching matches whole words only.
    #[derive(Default)]
    struct MemoryEntryStore {
        rows: Mutex<BTreeMap<i64, Entry>>,
    }

    fn not_found() -> AppError {
        AppError::not_found("the requested resource could not be found")
    }

    fn has_word(text: &str, query: &str) -> bool {
        query.is_empty()
            || query
                .split_whitespace()
                .all(|q| text.split_whitespace().any(|w| w.eq_ignore_ascii_case(q)))
    }

    #[async_trait]
    impl VersionedRepository<Entry> for MemoryEntryStore {
        async fn insert(&self, entry: &mut Entry) -> AppResult<()> {
            let mut rows = self.rows.lock().await;
            entry.id = rows.keys().next_back().copied().unwrap_or(0) + 1;
            entry.version = 1;
            rows.insert(entry.id, entry.clone());
            Ok(())
        }

        async fn get(&self, id: i64) -> AppResult<Entry> {
            self.rows.lock().await.get(&id).cloned().ok_or_else(not_found)
        }

        async fn update(&self, entry: &mut Entry) -> AppResult<()> {
            let mut rows = self.rows.lock().await;
            match rows.get_mut(&entry.id) {
                Some(stored) if stored.version == entry.version => {
                    entry.version += 1;
                    *stored = entry.clone();
                    Ok(())
                }
                _ => Err(AppError::edit_conflict()),
            }
        }

        async fn delete(&self, id: i64) -> AppResult<()> {
            self.rows.lock().await.remove(&id).map(|_| ()).ok_or_else(not_found)
        }
    }

    #[async_trait]
    impl EntryStore for MemoryEntryStore {
        async fn get_all(
            &self,
            name: &str,
            level: &str,
            mode: &[String],
            filters: &Filters,
        ) -> AppResult<(Vec<Entry>, Metadata)> {
            let column = filters.sort_column()?;
            let mut matched: Vec<Entry> = self
                .rows
                .lock()
                .await
                .values()
                .filter(|e| has_word(&e.name, name) && has_word(&e.level, level))
                .filter(|e| mode.iter().all(|m| e.mode.contains(m)))
                .cloned()
                .collect();

            matched.sort_by(|a, b| {
                let primary = match column {
                    "name" => a.name.cmp(&b.name),
                    "level" => a.level.cmp(&b.level),
                    _ => a.id.cmp(&b.id),
                };
                let primary = match filters.sort_direction() {
                    entry_core::types::SortDirection::Asc => primary,
                    entry_core::types::SortDirection::Desc => primary.reverse(),
                };
                primary.then(a.id.cmp(&b.id))
            });

            let total = matched.len() as i64;
            let page: Vec<Entry> = matched
                .into_iter()
                .skip(filters.offset() as usize)
                .take(filters.limit() as usize)
                .collect();
            let metadata = if page.is_empty() {
                Metadata::default()
            } else {
                Metadata::calculate(total, filters.page, filters.page_size)
            };
            Ok((page, metadata))
        }
    }

    fn service() -> EntryService {
        EntryService::new(Arc::new(MemoryEntryStore::default()))
    }

    fn ctx() -> RequestContext {
        RequestContext { user_id: 1 }
    }

    fn new_entry(name: &str, level: &str, mode: &[&str]) -> NewEntry {
        NewEntry {
            name: name.to_string(),
            level: level.to_string(),
            contact: "Jo Smith".to_string(),
            phone: "(501) 822-1234".to_string(),
            email: "jo@example.org".to_string(),
            website: "https://example.org".to_string(),
            address: "4 Hummingbird Highway".to_string(),
            mode: mode.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn query(page: i64, page_size: i64, sort: &str) -> EntryQuery {
        EntryQuery {
            filters: Filters::new(page, page_size, sort, SORT_SAFELIST),
            ..EntryQuery::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_identity() {
        let svc = service();
        let entry = svc
            .create(&ctx(), new_entry("Library", "primary", &["online"]))
            .await
            .unwrap();
        assert_eq!(entry.id, 1);
        assert_eq!(entry.version, 1);
        assert_eq!(svc.get(1).await.unwrap(), entry);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_entry() {
        let svc = service();
        let err = svc
            .create(&ctx(), new_entry("Library", "primary", &["online", "online"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.details.unwrap().get("mode").is_some());
        assert!(svc.get(1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_applies_patch_and_bumps_version() {
        let svc = service();
        svc.create(&ctx(), new_entry("Library", "primary", &["online"]))
            .await
            .unwrap();

        let patch = EntryPatch {
            contact: Some("New Contact".to_string()),
            ..EntryPatch::default()
        };
        let updated = svc.update(&ctx(), 1, patch, Some(1)).await.unwrap();
        assert_eq!(updated.contact, "New Contact");
        assert_eq!(updated.name, "Library");
        assert_eq!(updated.version, 2);
    }

    #[tokio::test]
    async fn test_update_with_stale_expected_version_conflicts() {
        let svc = service();
        svc.create(&ctx(), new_entry("Library", "primary", &["online"]))
            .await
            .unwrap();
        svc.update(&ctx(), 1, EntryPatch::default(), None)
            .await
            .unwrap();

        let patch = EntryPatch {
            name: Some("Stale".to_string()),
            ..EntryPatch::default()
        };
        let err = svc.update(&ctx(), 1, patch, Some(1)).await.unwrap_err();
        assert!(err.is_edit_conflict());

        let stored = svc.get(1).await.unwrap();
        assert_eq!(stored.name, "Library");
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn test_update_validates_patched_entry() {
        let svc = service();
        svc.create(&ctx(), new_entry("Library", "primary", &["online"]))
            .await
            .unwrap();

        let patch = EntryPatch {
            phone: Some("call me".to_string()),
            ..EntryPatch::default()
        };
        let err = svc.update(&ctx(), 1, patch, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(svc.get(1).await.unwrap().version, 1);
    }

    #[tokio::test]
    async fn test_missing_entries_are_not_found() {
        let svc = service();
        assert!(svc.get(99).await.unwrap_err().is_not_found());
        assert!(svc.delete(&ctx(), 99).await.unwrap_err().is_not_found());
        assert!(
            svc.update(&ctx(), 99, EntryPatch::default(), None)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let svc = service();
        svc.create(&ctx(), new_entry("Library", "primary", &["online"]))
            .await
            .unwrap();
        svc.delete(&ctx(), 1).await.unwrap();
        assert!(svc.get(1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_rejects_bad_paging_before_querying() {
        let svc = service();
        let err = svc.list(&query(0, 500, "email")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let details = err.details.unwrap();
        assert!(details.get("page").is_some());
        assert!(details.get("page_size").is_some());
        assert!(details.get("sort").is_some());
    }

    #[tokio::test]
    async fn test_list_filters_by_mode_containment() {
        let svc = service();
        svc.create(&ctx(), new_entry("Alpha", "primary", &["A", "B"]))
            .await
            .unwrap();
        svc.create(&ctx(), new_entry("Beta", "primary", &["A"]))
            .await
            .unwrap();

        let mut q = query(1, 20, "id");
        q.mode = vec!["A".to_string()];
        let (found, meta) = svc.list(&q).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(meta.total_records, 2);

        q.mode = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let (found, meta) = svc.list(&q).await.unwrap();
        assert!(found.is_empty());
        assert_eq!(meta, Metadata::default());
    }

    #[tokio::test]
    async fn test_list_sorts_descending_with_id_tiebreak() {
        let svc = service();
        for name in ["Same", "Same", "Other"] {
            svc.create(&ctx(), new_entry(name, "primary", &["online"]))
                .await
                .unwrap();
        }

        let (found, meta) = svc.list(&query(1, 2, "-name")).await.unwrap();
        assert_eq!(found.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(meta.last_page, 2);

        let (found, _) = svc.list(&query(2, 2, "-name")).await.unwrap();
        assert_eq!(found.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3]);
    }
}
