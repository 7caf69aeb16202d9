use async_trait::async_trait;
use bookmark_core::repository::{ListQuery, ReadRepository, Repository, Result};
use bookmark_core::{Bookmark, BookmarkDraft, BookmarkId};
use dashmap::DashMap;
use jiff::Timestamp;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory implementation of the Repository trait using DashMap.
///
/// Ids come from an atomic counter starting at 1, so concurrent inserts
/// always get distinct ids and a deleted id is never handed out again.
#[derive(Debug)]
pub struct InMemoryRepository {
    storage: DashMap<BookmarkId, Bookmark>,
    next_id: AtomicI64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            next_id: AtomicI64::new(1),
        }
    }

    fn allocate_id(&self) -> BookmarkId {
        BookmarkId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, id: BookmarkId) -> Result<Option<Bookmark>> {
        Ok(self.storage.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Bookmark>> {
        let mut bookmarks: Vec<Bookmark> = self
            .storage
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        bookmarks.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(bookmarks)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.storage.len() as u64)
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, draft: BookmarkDraft) -> Result<Bookmark> {
        let id = self.allocate_id();
        let bookmark = Bookmark::from_draft(id, Timestamp::now(), draft);

        self.storage.insert(id, bookmark.clone());
        Ok(bookmark)
    }

    async fn update(&self, id: BookmarkId, draft: BookmarkDraft) -> Result<Option<Bookmark>> {
        let Some(mut entry) = self.storage.get_mut(&id) else {
            return Ok(None);
        };

        entry.apply(draft);
        Ok(Some(entry.value().clone()))
    }

    async fn delete(&self, id: BookmarkId) -> Result<bool> {
        Ok(self.storage.remove(&id).is_some())
    }
}
