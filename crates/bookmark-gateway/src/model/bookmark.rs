use bookmark_core::{Bookmark, ListQuery};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
pub struct ListBookmarksParams {
    pub tag: Option<String>,
}

impl ListBookmarksParams {
    /// Builds the params from raw query pairs; a repeated `tag` keeps its last value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let tag = pairs
            .into_iter()
            .filter(|(key, _)| key == "tag")
            .map(|(_, value)| value)
            .last();
        Self { tag }
    }

    pub fn into_query(self) -> ListQuery {
        self.tag
            .as_deref()
            .map_or_else(ListQuery::all, ListQuery::tagged)
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct BookmarkResponse {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
}

impl From<Bookmark> for BookmarkResponse {
    fn from(bookmark: Bookmark) -> Self {
        Self {
            id: bookmark.id.get(),
            url: bookmark.url,
            title: bookmark.title,
            description: bookmark.description,
            tags: bookmark.tags,
            created_at: bookmark.created_at,
        }
    }
}
