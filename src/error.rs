//! Error handling module
//!
//! Centralized error taxonomy shared by every layer, plus the HTTP error
//! envelope the handler layer renders.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Failure kinds visible to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrlParams,
    InvalidBodyParams,
    NameRequired,
    UserNotFound,
    NoRows,
    Unexpected,
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Request errors
    #[error("err.request.invalid_url_params: {0}")]
    InvalidUrlParams(String),

    #[error("err.request.invalid_body_params: {0}")]
    InvalidBodyParams(String),

    #[error("err.request.name_required")]
    NameRequired,

    // Existence-gated operations
    #[error("err.user.no_user_with_such_id")]
    UserNotFound,

    #[error("err.sql.no_rows")]
    NoRows,

    // Store call lifecycle
    #[error("store call exceeded its deadline of {0:?}")]
    DeadlineExceeded(std::time::Duration),

    #[error("request cancelled")]
    Cancelled,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidUrlParams(_) => ErrorKind::InvalidUrlParams,
            AppError::InvalidBodyParams(_) => ErrorKind::InvalidBodyParams,
            AppError::NameRequired => ErrorKind::NameRequired,
            AppError::UserNotFound => ErrorKind::UserNotFound,
            AppError::NoRows => ErrorKind::NoRows,
            AppError::DeadlineExceeded(_)
            | AppError::Cancelled
            | AppError::Database(_) => ErrorKind::Unexpected,
        }
    }

    /// True for both the service-level and the store-level "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::UserNotFound | ErrorKind::NoRows)
    }

    /// Default status mapping. Handlers that must report every service
    /// failure as 500 use [`HttpError::internal`] instead.
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidUrlParams | ErrorKind::InvalidBodyParams | ErrorKind::NameRequired => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::UserNotFound | ErrorKind::NoRows => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Standard status phrase: canonical reason, lower-cased, spaces as underscores.
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_lowercase()
        .replace(' ', "_")
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errors: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub status_code: u16,
    pub status_text: String,
    pub err: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, err: impl Into<String>) -> Self {
        Self {
            errors: ErrorDetails {
                status_code: status.as_u16(),
                status_text: status_text(status),
                err: err.into(),
            },
        }
    }
}

/// An error paired with the status the handler decided to report.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub error: AppError,
}

impl HttpError {
    pub fn new(status: StatusCode, error: AppError) -> Self {
        Self { status, error }
    }

    pub fn internal(error: AppError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }
}

impl From<AppError> for HttpError {
    fn from(error: AppError) -> Self {
        Self::new(error.status_code(), error)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "internal server error: {}", self.error);
        } else {
            tracing::error!(status = %self.status, "request error: {}", self.error);
        }

        let body = ErrorResponse::new(self.status, self.error.to_string());
        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        HttpError::from(self).into_response()
    }
}
