//! Shared handler state.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::service::UserService;

/// State injected into every handler. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    /// Process-wide token; every request context is a child of it
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(users: Arc<dyn UserService>, shutdown: CancellationToken) -> Self {
        Self { users, shutdown }
    }
}
