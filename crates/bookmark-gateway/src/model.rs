mod bookmark;
mod health;

pub use bookmark::{BookmarkResponse, ListBookmarksParams};
pub use health::{ErrorResponse, HealthResponse};
