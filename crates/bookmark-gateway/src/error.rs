use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookmark_core::{BookmarkError, FieldErrors};
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid bookmark payload: {0}")]
    Invalid(FieldErrors),
    #[error("rejected request: {detail}")]
    Rejected { status: StatusCode, detail: String },
    #[error("bookmark not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<BookmarkError> for AppError {
    fn from(error: BookmarkError) -> Self {
        match error {
            BookmarkError::Invalid(errors) => AppError::Invalid(errors),
            BookmarkError::NotFound(_) => AppError::NotFound,
            BookmarkError::Storage(source) => AppError::Internal(source.to_string()),
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Invalid(errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // Every unreadable body is a bad request, including a missing content type.
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::BAD_REQUEST,
            ref other => other.status(),
        };
        AppError::Rejected {
            status,
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Invalid(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            AppError::Rejected { status, detail } => {
                (status, Json(ErrorResponse::new(detail))).into_response()
            }
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found."))).into_response()
            }
            AppError::Internal(message) => {
                error!(error = %message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal server error.")),
                )
                    .into_response()
            }
        }
    }
}
