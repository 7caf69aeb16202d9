use crate::error::{AppError, Result};
use crate::model::{BookmarkResponse, ListBookmarksParams};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bookmark_core::{BookmarkId, BookmarkInput};
use serde_json::Value;

/// Only plain digit segments name a bookmark; anything else resolves to 404.
fn parse_id(raw: &str) -> Result<BookmarkId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound);
    }
    raw.parse().map_err(|_| AppError::NotFound)
}

fn parse_input(payload: std::result::Result<Json<Value>, JsonRejection>) -> Result<BookmarkInput> {
    let Json(body) = payload?;
    Ok(BookmarkInput::try_from(body)?)
}

pub async fn list_bookmarks_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<BookmarkResponse>>> {
    let Query(pairs) = params?;
    let query = ListBookmarksParams::from_pairs(pairs).into_query();
    let bookmarks = state.bookmarks().list(query).await?;
    Ok(Json(bookmarks.into_iter().map(BookmarkResponse::from).collect()))
}

pub async fn create_bookmark_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<BookmarkResponse>)> {
    let input = parse_input(payload)?;
    let bookmark = state.bookmarks().create(input).await?;
    Ok((StatusCode::CREATED, Json(bookmark.into())))
}

pub async fn get_bookmark_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<BookmarkResponse>> {
    let id = parse_id(&id)?;
    let bookmark = state.bookmarks().retrieve(id).await?;
    Ok(Json(bookmark.into()))
}

pub async fn update_bookmark_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<BookmarkResponse>> {
    let id = parse_id(&id)?;
    let input = match parse_input(payload) {
        Ok(input) => input,
        Err(err) => {
            // A missing bookmark is reported before a bad body.
            state.bookmarks().retrieve(id).await?;
            return Err(err);
        }
    };
    let bookmark = state.bookmarks().update(id, input).await?;
    Ok(Json(bookmark.into()))
}

pub async fn delete_bookmark_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    state.bookmarks().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_only_digits() {
        assert_eq!(parse_id("5").unwrap(), BookmarkId::new(5));
        assert_eq!(parse_id("007").unwrap(), BookmarkId::new(7));

        for raw in ["", "+5", "-3", "1.0", "abc", " 1", "99999999999999999999"] {
            assert!(matches!(parse_id(raw), Err(AppError::NotFound)), "accepted {raw:?}");
        }
    }
}
