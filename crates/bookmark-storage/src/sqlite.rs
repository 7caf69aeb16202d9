use async_trait::async_trait;
use bookmark_core::error::StorageError;
use bookmark_core::repository::{ListQuery, ReadRepository, Repository, Result};
use bookmark_core::{Bookmark, BookmarkDraft, BookmarkId};
use jiff::Timestamp;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::debug;

const SCHEMA: &str = include_str!("../ddl/sqlite/bookmarks.sql");

/// SQLite implementation of the repository contract.
///
/// Ids come from `AUTOINCREMENT`, so they are never reused after a delete.
/// Tags are stored as a JSON array and `created_at` as microseconds since
/// the Unix epoch. Deletes are hard deletes.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new connection pool, creating the
    /// database file if it does not exist yet.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates a repository backed by a private in-memory database.
    ///
    /// The pool is pinned to a single long-lived connection because every
    /// SQLite memory connection sees its own database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(map_sqlx_error)?;
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `bookmarks` table and its index if they are missing.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn now_micros() -> i64 {
    Timestamp::now().as_microsecond()
}

fn parse_created_at(micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{micros}': {e}"))
    })
}

fn encode_tags(tags: &[String]) -> Result<String> {
    serde_json::to_string(tags)
        .map_err(|e| StorageError::InvalidData(format!("cannot encode tags: {e}")))
}

fn decode_tags(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| StorageError::InvalidData(format!("invalid tags '{raw}': {e}")))
}

fn bookmark_from_row(row: &SqliteRow) -> Result<Bookmark> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let url: String = row.try_get("url").map_err(map_sqlx_error)?;
    let title: String = row.try_get("title").map_err(map_sqlx_error)?;
    let description: String = row.try_get("description").map_err(map_sqlx_error)?;
    let tags_raw: String = row.try_get("tags").map_err(map_sqlx_error)?;
    let created_at_raw: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(Bookmark {
        id: BookmarkId::new(id),
        url,
        title,
        description,
        tags: decode_tags(&tags_raw)?,
        created_at: parse_created_at(created_at_raw)?,
    })
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        sqlx::Error::Configuration(_) => StorageError::Operation(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn get(&self, id: BookmarkId) -> Result<Option<Bookmark>> {
        let row = sqlx::query(
            r#"
            SELECT id, url, title, description, tags, created_at
            FROM bookmarks
            WHERE id = ?
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(bookmark_from_row).transpose()
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Bookmark>> {
        let rows = match &query.tag {
            None => {
                sqlx::query(
                    r#"
                    SELECT id, url, title, description, tags, created_at
                    FROM bookmarks
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
            Some(tag) => {
                sqlx::query(
                    r#"
                    SELECT id, url, title, description, tags, created_at
                    FROM bookmarks
                    WHERE EXISTS (
                        SELECT 1 FROM json_each(bookmarks.tags)
                        WHERE json_each.value = ?
                    )
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .bind(tag.as_str())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_sqlx_error)?;

        debug!(tag = ?query.tag, rows = rows.len(), "listed bookmarks");
        rows.iter().map(bookmark_from_row).collect()
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookmarks")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        u64::try_from(count)
            .map_err(|e| StorageError::InvalidData(format!("invalid row count '{count}': {e}")))
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn insert(&self, draft: BookmarkDraft) -> Result<Bookmark> {
        let tags = encode_tags(&draft.tags)?;

        let row = sqlx::query(
            r#"
            INSERT INTO bookmarks (url, title, description, tags, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, url, title, description, tags, created_at
            "#,
        )
        .bind(draft.url)
        .bind(draft.title)
        .bind(draft.description)
        .bind(tags)
        .bind(now_micros())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let bookmark = bookmark_from_row(&row)?;
        debug!(id = %bookmark.id, "inserted bookmark row");
        Ok(bookmark)
    }

    async fn update(&self, id: BookmarkId, draft: BookmarkDraft) -> Result<Option<Bookmark>> {
        let tags = encode_tags(&draft.tags)?;

        let row = sqlx::query(
            r#"
            UPDATE bookmarks
            SET url = ?, title = ?, description = ?, tags = ?
            WHERE id = ?
            RETURNING id, url, title, description, tags, created_at
            "#,
        )
        .bind(draft.url)
        .bind(draft.title)
        .bind(draft.description)
        .bind(tags)
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(bookmark_from_row).transpose()
    }

    async fn delete(&self, id: BookmarkId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
