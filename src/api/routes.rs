//! API Routes
//!
//! HTTP endpoint definitions for the user resource.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};

use crate::domain::{RequestContext, User, UserFields, UserRequest};
use crate::error::HttpError;

use super::extract::{JsonBody, UserIdParam};
use super::response::Envelope;
use super::state::AppState;

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route("/users/:id", get(get_user).put(update_user))
}

// =========================================================================
// GET /users
// =========================================================================

/// List all users, oldest first
async fn list_users(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Envelope<Vec<User>>, HttpError> {
    let users = state
        .users
        .list_users(&ctx)
        .await
        .map_err(HttpError::internal)?;

    tracing::debug!(count = users.len(), "get user list");
    Ok(Envelope::with_data(StatusCode::OK, users))
}

// =========================================================================
// GET /users/:id
// =========================================================================

/// Get user by ID. Not-found is reported as 422.
async fn get_user(
    State(state): State<AppState>,
    ctx: RequestContext,
    UserIdParam(id): UserIdParam,
) -> Result<Envelope<User>, HttpError> {
    let user = state.users.get_user(&ctx, id).await.map_err(|err| {
        if err.is_not_found() {
            HttpError::new(StatusCode::UNPROCESSABLE_ENTITY, err)
        } else {
            HttpError::internal(err)
        }
    })?;

    tracing::debug!(user_id = id, "get user");
    Ok(Envelope::with_data(StatusCode::OK, user))
}

// =========================================================================
// POST /users
// =========================================================================

/// Create a new user
async fn create_user(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonBody(request): JsonBody<UserRequest>,
) -> Result<Envelope<()>, HttpError> {
    let UserFields { name, surname } = request.into_fields()?;

    state
        .users
        .create_user(&ctx, name.clone(), surname.clone())
        .await
        .map_err(HttpError::internal)?;

    tracing::debug!(name = %name, surname = ?surname, "user created");
    Ok(Envelope::empty(StatusCode::CREATED))
}

// =========================================================================
// PUT /users/:id
// =========================================================================

/// Update user.
///
/// Every service failure maps to 500 here, including an unknown id, which
/// `get_user` reports as 422.
async fn update_user(
    State(state): State<AppState>,
    ctx: RequestContext,
    UserIdParam(id): UserIdParam,
    JsonBody(request): JsonBody<UserRequest>,
) -> Result<Envelope<()>, HttpError> {
    let UserFields { name, surname } = request.into_fields()?;

    state
        .users
        .update_user(&ctx, id, name.clone(), surname.clone())
        .await
        .map_err(HttpError::internal)?;

    tracing::debug!(user_id = id, name = %name, surname = ?surname, "user updated");
    Ok(Envelope::empty(StatusCode::OK))
}
