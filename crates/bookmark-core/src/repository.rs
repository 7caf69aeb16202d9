use crate::bookmark::{Bookmark, BookmarkDraft, BookmarkId};
use crate::error::StorageError;
use crate::tag::TagFilter;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Criteria for listing bookmarks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Only return bookmarks carrying this tag.
    pub tag: Option<TagFilter>,
}

impl ListQuery {
    /// A query matching every bookmark.
    pub fn all() -> Self {
        Self::default()
    }

    /// A query matching bookmarks tagged with `tag`.
    ///
    /// A blank tag yields an unfiltered query.
    pub fn tagged(tag: &str) -> Self {
        Self {
            tag: TagFilter::parse(tag),
        }
    }

    /// Returns `true` if `bookmark` satisfies the query.
    pub fn matches(&self, bookmark: &Bookmark) -> bool {
        self.tag
            .as_ref()
            .map_or(true, |tag| bookmark.has_tag(tag.as_str()))
    }
}

/// A read-only view of a bookmark store.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves a bookmark by id.
    /// Returns `None` if no such bookmark exists.
    async fn get(&self, id: BookmarkId) -> Result<Option<Bookmark>>;

    /// Lists the bookmarks matching `query`, newest first.
    ///
    /// Bookmarks created at the same instant are ordered by descending id.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Bookmark>>;

    /// Returns the number of stored bookmarks.
    async fn count(&self) -> Result<u64>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Persists a new bookmark, assigning its id and creation timestamp.
    /// Returns the stored record.
    async fn insert(&self, draft: BookmarkDraft) -> Result<Bookmark>;

    /// Replaces the mutable fields of an existing bookmark.
    /// Returns `None` if the bookmark does not exist; nothing is created in that case.
    async fn update(&self, id: BookmarkId, draft: BookmarkDraft) -> Result<Option<Bookmark>>;

    /// Permanently removes a bookmark.
    /// Returns `true` if the bookmark existed and was removed.
    async fn delete(&self, id: BookmarkId) -> Result<bool>;
}
