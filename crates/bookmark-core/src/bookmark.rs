use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use typed_builder::TypedBuilder;

/// Store-assigned identifier of a bookmark.
///
/// Ids are handed out by the storage backend on insert and are never
/// reused, even after the record they identified has been deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkId(i64);

impl BookmarkId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for BookmarkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookmarkId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

impl From<i64> for BookmarkId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A stored bookmark record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub url: String,
    pub title: String,
    pub description: String,
    /// Trimmed, lower-cased tags in the order they were submitted.
    pub tags: Vec<String>,
    pub created_at: Timestamp,
}

impl Bookmark {
    /// Builds the stored record for `draft` under the given identity.
    pub fn from_draft(id: BookmarkId, created_at: Timestamp, draft: BookmarkDraft) -> Self {
        Self {
            id,
            url: draft.url,
            title: draft.title,
            description: draft.description,
            tags: draft.tags,
            created_at,
        }
    }

    /// Replaces every mutable field with the contents of `draft`.
    ///
    /// `id` and `created_at` are left untouched.
    pub fn apply(&mut self, draft: BookmarkDraft) {
        self.url = draft.url;
        self.title = draft.title;
        self.description = draft.description;
        self.tags = draft.tags;
    }

    /// Returns `true` if the bookmark carries exactly `tag`.
    ///
    /// `tag` is expected to be normalized already; stored tags always are.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A validated, normalized bookmark payload ready to be persisted.
///
/// Drafts coming from clients are produced by
/// [`BookmarkInput::validate`](crate::validation::BookmarkInput::validate);
/// the builder is meant for trusted sources such as the seed routine.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct BookmarkDraft {
    #[builder(setter(into))]
    pub url: String,
    #[builder(setter(into))]
    pub title: String,
    #[builder(default, setter(into))]
    pub description: String,
    #[builder(default)]
    pub tags: Vec<String>,
}
