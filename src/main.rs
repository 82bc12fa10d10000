//! user_registry - User records backend API
//!
//! Layered CRUD service (handler -> service -> repository) over PostgreSQL.

use std::net::SocketAddr;

use tokio::net::lookup_host;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_registry::{app, db, Config};

/// Initialize tracing/logging
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_filter().into());

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config);
    config.log_summary();

    let addr: SocketAddr = lookup_host((config.host.as_str(), config.port))
        .await?
        .next()
        .ok_or_else(|| anyhow::anyhow!("Cannot resolve {}:{}", config.host, config.port))?;

    tracing::info!("Starting user_registry server");
    tracing::info!("Connecting to database...");

    let pool = db::connect(&config.database).await?;
    db::verify_connection(&pool).await?;

    if !db::check_schema(&pool, &config.database.schema).await? {
        tracing::error!("Database schema is not complete. Please run migrations.");
        return Err(anyhow::anyhow!("Database schema incomplete"));
    }

    tracing::info!("Database connected successfully");
    tracing::info!("Listening on http://{}", addr);

    let shutdown = CancellationToken::new();
    let state = app::build_pg_state(pool.clone(), &config, shutdown.clone());
    let router = app::build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    // Cleanup
    tracing::info!("Server shutting down...");
    pool.close().await;
    tracing::info!("Database connections closed. Goodbye!");

    Ok(())
}

/// Waits for Ctrl+C or SIGTERM, then cancels every in-flight request context
/// before the server starts draining.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }

    shutdown.cancel();
}
