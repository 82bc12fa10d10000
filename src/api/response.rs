//! Success response envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::status_text;

/// `{status_code, status_text, data?}`; `data` is omitted when absent.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status_code: u16,
    pub status_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn with_data(status: StatusCode, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            status_text: status_text(status),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status_code: status.as_u16(),
            status_text: status_text(status),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
