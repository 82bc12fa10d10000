//! Request extractors.
//!
//! Rejections carry the error taxonomy so malformed ids and bodies are
//! answered with the standard error envelope before any handler runs.

use std::convert::Infallible;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::domain::{RequestContext, UserId};
use crate::error::{AppError, AppResult, HttpError};

use super::state::AppState;

/// Parse a path id as an unsigned integer that fits the store's id column.
pub fn parse_user_id(raw: &str) -> AppResult<UserId> {
    let id: u64 = raw
        .parse()
        .map_err(|e| AppError::InvalidUrlParams(format!("parsing {raw:?}: {e}")))?;

    UserId::try_from(id)
        .map_err(|_| AppError::InvalidUrlParams(format!("parsing {raw:?}: value out of range")))
}

/// `:id` path segment parsed with [`parse_user_id`]
#[derive(Debug, Clone, Copy)]
pub struct UserIdParam(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdParam
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidUrlParams(e.body_text()))?;

        Ok(UserIdParam(parse_user_id(&raw)?))
    }
}

/// JSON body extractor. Unlike `axum::Json` it ignores the content type and
/// maps every failure, including an empty body, to `InvalidBodyParams`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidBodyParams(e.body_text()))?;

        let value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::InvalidBodyParams(e.to_string()))?;

        Ok(JsonBody(value))
    }
}

/// Uses the context installed by the request middleware, or derives a fresh
/// one from the shutdown token when the middleware is not mounted.
#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(|| RequestContext::child_of(&state.shutdown)))
    }
}
