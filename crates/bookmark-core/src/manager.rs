use crate::bookmark::{Bookmark, BookmarkId};
use crate::error::BookmarkError;
use crate::repository::ListQuery;
use crate::validation::BookmarkInput;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, BookmarkError>;

/// The bookmark resource: validates client payloads and persists them.
///
/// Every call handles exactly one request and touches at most one record.
#[async_trait]
pub trait BookmarkManager: Send + Sync + 'static {
    /// Lists bookmarks matching `query`, newest first.
    /// An empty result is not an error.
    async fn list(&self, query: ListQuery) -> Result<Vec<Bookmark>>;

    /// Validates `input` and stores it as a new bookmark.
    async fn create(&self, input: BookmarkInput) -> Result<Bookmark>;

    /// Fetches a single bookmark.
    async fn retrieve(&self, id: BookmarkId) -> Result<Bookmark>;

    /// Replaces an existing bookmark with the validated `input`.
    ///
    /// A missing bookmark is reported before any validation failure.
    async fn update(&self, id: BookmarkId, input: BookmarkInput) -> Result<Bookmark>;

    /// Permanently deletes a bookmark.
    async fn delete(&self, id: BookmarkId) -> Result<()>;
}
