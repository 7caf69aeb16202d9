use std::sync::Arc;

use bookmark_core::BookmarkManager;

#[derive(Clone)]
pub struct AppState {
    bookmarks: Arc<dyn BookmarkManager>,
}

impl AppState {
    pub fn new(bookmarks: Arc<dyn BookmarkManager>) -> Self {
        Self { bookmarks }
    }

    pub fn bookmarks(&self) -> &dyn BookmarkManager {
        self.bookmarks.as_ref()
    }
}
