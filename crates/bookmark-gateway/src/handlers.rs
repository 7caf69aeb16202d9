mod bookmark;
mod health;

pub use bookmark::{
    create_bookmark_handler, delete_bookmark_handler, get_bookmark_handler,
    list_bookmarks_handler, update_bookmark_handler,
};
pub use health::health_handler;
