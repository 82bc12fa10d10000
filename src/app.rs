//! Application assembly
//!
//! Wires repository, service and router together and applies the
//! cross-cutting layers.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::Config;
use crate::repository::{PgUserRepository, UserRepository};
use crate::service::UserManager;

/// Build handler state on top of any repository implementation
pub fn build_state(repo: Arc<dyn UserRepository>, shutdown: CancellationToken) -> AppState {
    AppState::new(Arc::new(UserManager::new(repo)), shutdown)
}

/// Build handler state backed by PostgreSQL
pub fn build_pg_state(pool: PgPool, config: &Config, shutdown: CancellationToken) -> AppState {
    let repo = PgUserRepository::new(pool, config.database.timeout);
    build_state(Arc::new(repo), shutdown)
}

/// Build the application router
pub fn build_router(state: AppState, config: &Config) -> Router {
    let mut api_router = api::create_router().route("/", get(api_root));

    if config.cors_enabled {
        match api::middleware::cors_layer(&config.cors_allow_origins) {
            Some(cors) => api_router = api_router.layer(cors),
            None => tracing::warn!("CORS enabled but no valid origins configured"),
        }
    }

    // Axum layers are applied in reverse order (last added = first executed)
    // Order: trace -> set request id -> propagate request id -> headers -> context -> handler
    let mut router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_router)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::middleware::request_context_middleware,
        ));

    for layer in api::middleware::security_headers() {
        router = router.layer(layer);
    }

    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// API root
async fn api_root() -> &'static str {
    "it works"
}
