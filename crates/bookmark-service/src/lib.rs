//! Bookmark resource service implementation.
//!
//! This crate provides [`BookmarkService`], the implementation of
//! [`bookmark_core::BookmarkManager`] over any record store. Core types are
//! re-exported from `bookmark_core`.

pub mod service;

pub use bookmark_core::{BookmarkError, BookmarkManager};
pub use service::BookmarkService;
