//! Core types and traits for the bookmark service.
//!
//! This crate provides the bookmark model, payload validation, the record
//! store contract and the resource contract shared by the storage backends,
//! the service implementation and the HTTP gateway.

pub mod bookmark;
pub mod error;
pub mod manager;
pub mod repository;
pub mod seed;
pub mod tag;
pub mod validation;

pub use bookmark::{Bookmark, BookmarkDraft, BookmarkId};
pub use error::{BookmarkError, StorageError};
pub use manager::BookmarkManager;
pub use repository::{ListQuery, ReadRepository, Repository};
pub use seed::{seed_if_empty, SeedOutcome};
pub use tag::TagFilter;
pub use validation::{BookmarkInput, FieldErrors};
