use crate::bookmark::BookmarkId;
use crate::validation::FieldErrors;
use thiserror::Error;

/// Errors raised by the record store backends.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors returned by a [`BookmarkManager`](crate::manager::BookmarkManager).
///
/// `Invalid` and `NotFound` are routine outcomes of a request; only
/// `Storage` indicates a fault on the server side.
#[derive(Debug, Clone, Error)]
pub enum BookmarkError {
    #[error("invalid bookmark payload: {0}")]
    Invalid(FieldErrors),
    #[error("bookmark not found: {0}")]
    NotFound(BookmarkId),
    #[error("storage error: {0}")]
    Storage(
        #[from]
        #[source]
        StorageError,
    ),
}

impl From<FieldErrors> for BookmarkError {
    fn from(errors: FieldErrors) -> Self {
        BookmarkError::Invalid(errors)
    }
}
