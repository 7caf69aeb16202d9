use async_trait::async_trait;
use bookmark_core::{
    Bookmark, BookmarkError, BookmarkId, BookmarkInput, BookmarkManager, ListQuery, ReadRepository,
    Repository, StorageError,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

type Result<T> = std::result::Result<T, BookmarkError>;

/// A concrete implementation of the `BookmarkManager` trait.
///
/// This service wraps a `Repository` and handles, per request:
/// - payload validation and normalization
/// - existence checks for update and delete
/// - translation of store outcomes into `BookmarkError`
///
/// Same-id races between concurrent writers are left to the store, which
/// applies last-write-wins per row.
#[derive(Debug)]
pub struct BookmarkService<R> {
    repository: Arc<R>,
}

impl<R> Clone for BookmarkService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: Repository> BookmarkService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[async_trait]
impl<R: Repository> BookmarkManager for BookmarkService<R> {
    async fn list(&self, query: ListQuery) -> Result<Vec<Bookmark>> {
        let bookmarks = self.repository.list(&query).await.map_err(storage_fault)?;
        debug!(tag = ?query.tag, count = bookmarks.len(), "listed bookmarks");
        Ok(bookmarks)
    }

    async fn create(&self, input: BookmarkInput) -> Result<Bookmark> {
        let draft = input.validate().inspect_err(|errors| {
            debug!(%errors, "rejected bookmark payload");
        })?;

        let bookmark = self.repository.insert(draft).await.map_err(storage_fault)?;
        info!(id = %bookmark.id, url = %bookmark.url, "created bookmark");
        Ok(bookmark)
    }

    async fn retrieve(&self, id: BookmarkId) -> Result<Bookmark> {
        self.repository
            .get(id)
            .await
            .map_err(storage_fault)?
            .ok_or(BookmarkError::NotFound(id))
    }

    async fn update(&self, id: BookmarkId, input: BookmarkInput) -> Result<Bookmark> {
        if self.repository.get(id).await.map_err(storage_fault)?.is_none() {
            debug!(%id, "update of missing bookmark");
            return Err(BookmarkError::NotFound(id));
        }

        let draft = input.validate().inspect_err(|errors| {
            debug!(%id, %errors, "rejected bookmark payload");
        })?;

        // The row may have been deleted since the existence check.
        let bookmark = self
            .repository
            .update(id, draft)
            .await
            .map_err(storage_fault)?
            .ok_or(BookmarkError::NotFound(id))?;

        info!(%id, "updated bookmark");
        Ok(bookmark)
    }

    async fn delete(&self, id: BookmarkId) -> Result<()> {
        if !self.repository.delete(id).await.map_err(storage_fault)? {
            debug!(%id, "delete of missing bookmark");
            return Err(BookmarkError::NotFound(id));
        }

        info!(%id, "deleted bookmark");
        Ok(())
    }
}

fn storage_fault(error: StorageError) -> BookmarkError {
    warn!(%error, "bookmark storage operation failed");
    BookmarkError::Storage(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookmark_storage::InMemoryRepository;
    use serde_json::{json, Value};

    fn test_service() -> BookmarkService<InMemoryRepository> {
        BookmarkService::new(InMemoryRepository::new())
    }

    fn input(value: Value) -> BookmarkInput {
        BookmarkInput::try_from(value).unwrap()
    }

    #[tokio::test]
    async fn create_normalizes_and_assigns_identity() {
        let service = test_service();

        let created = service
            .create(input(json!({
                "url": "https://example.com",
                "title": "Example",
                "tags": ["A", " b "],
            })))
            .await
            .unwrap();

        assert_eq!(created.id, BookmarkId::new(1));
        assert_eq!(created.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(created.description, "");

        let fetched = service.retrieve(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_ignores_client_identity() {
        let service = test_service();

        let created = service
            .create(input(json!({
                "id": 42,
                "created_at": "2000-01-01T00:00:00Z",
                "url": "https://example.com",
                "title": "Example",
            })))
            .await
            .unwrap();

        assert_eq!(created.id, BookmarkId::new(1));
        assert_ne!(created.created_at.to_string(), "2000-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn create_with_invalid_payload_stores_nothing() {
        let service = test_service();

        let err = service
            .create(input(json!({"title": "No URL"})))
            .await
            .unwrap_err();

        match err {
            BookmarkError::Invalid(errors) => assert!(errors.contains("url")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(service.repository().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn retrieve_missing_is_not_found() {
        let service = test_service();

        let err = service.retrieve(BookmarkId::new(9999)).await.unwrap_err();
        assert!(matches!(err, BookmarkError::NotFound(id) if id == BookmarkId::new(9999)));
    }

    #[tokio::test]
    async fn list_with_and_without_tag() {
        let service = test_service();
        service
            .create(input(json!({
                "url": "https://seed.com",
                "title": "Seed Bookmark",
                "tags": ["seed"],
            })))
            .await
            .unwrap();
        service
            .create(input(json!({
                "url": "https://other.com",
                "title": "Other",
                "tags": ["other"],
            })))
            .await
            .unwrap();

        assert_eq!(service.list(ListQuery::all()).await.unwrap().len(), 2);

        let seeded = service.list(ListQuery::tagged("seed")).await.unwrap();
        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded[0].title, "Seed Bookmark");

        assert!(service
            .list(ListQuery::tagged("missing"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn update_replaces_all_mutable_fields() {
        let service = test_service();
        let created = service
            .create(input(json!({
                "url": "https://update-me.com",
                "title": "Update Me",
                "description": "Will be updated",
                "tags": ["old"],
            })))
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                input(json!({
                    "url": "https://updated.com",
                    "title": "Updated Title",
                })),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, "Updated Title");
        assert_eq!(updated.description, "");
        assert!(updated.tags.is_empty());
    }

    #[tokio::test]
    async fn update_missing_wins_over_invalid_payload() {
        let service = test_service();

        let err = service
            .update(BookmarkId::new(9999), input(json!({"title": ""})))
            .await
            .unwrap_err();

        assert!(matches!(err, BookmarkError::NotFound(_)));
        assert_eq!(service.repository().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_with_invalid_payload_keeps_record() {
        let service = test_service();
        let created = service
            .create(input(json!({"url": "https://example.com", "title": "Keep"})))
            .await
            .unwrap();

        let err = service
            .update(
                created.id,
                input(json!({
                    "url": "https://example.com",
                    "title": "Keep",
                    "tags": ["a", "b", "c", "d", "e", "f"],
                })),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, BookmarkError::Invalid(ref errors) if errors.contains("tags")));
        assert_eq!(service.retrieve(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn delete_existing_then_missing() {
        let service = test_service();
        let created = service
            .create(input(json!({"url": "https://example.com", "title": "Gone"})))
            .await
            .unwrap();

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.retrieve(created.id).await.unwrap_err(),
            BookmarkError::NotFound(_)
        ));
        assert!(matches!(
            service.delete(created.id).await.unwrap_err(),
            BookmarkError::NotFound(_)
        ));
    }

    #[test]
    fn service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BookmarkService<InMemoryRepository>>();
    }
}
