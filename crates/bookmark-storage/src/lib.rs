//! Record store backends for the bookmark service.
//!
//! [`InMemoryRepository`] keeps bookmarks in a concurrent map and is meant
//! for development and tests; [`SqliteRepository`] persists them with sqlx.

pub mod memory;
pub mod sqlite;

pub use bookmark_core::error::StorageError;
pub use bookmark_core::repository::{ListQuery, ReadRepository, Repository};
pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;
