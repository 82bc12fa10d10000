//! Database module
//!
//! Connection pool construction and startup schema checks.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Connection options for the pool.
///
/// `DATABASE_URL` wins when set; otherwise the discrete `DB_*` parts are
/// passed through as-is, so credentials need no URL escaping.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, sqlx::Error> {
    let options = match &config.url {
        Some(url) => PgConnectOptions::from_str(url)?,
        None => PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name)
            .ssl_mode(PgSslMode::Disable),
    };

    Ok(options.options([("search_path", config.schema.as_str())]))
}

/// Create the connection pool with `search_path` pinned to the configured schema
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.timeout)
        .connect_with(connect_options(config)?)
        .await
}

/// Verify database connectivity
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Check that the `users` table exists in `schema`
/// Note: the schema itself is created from migrations/ SQL files
pub async fn check_schema(pool: &PgPool, schema: &str) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = $1 AND table_name = 'users'
        )
        "#,
    )
    .bind(schema)
    .fetch_one(pool)
    .await?;

    if !exists {
        tracing::error!("Required table '{}.users' does not exist", schema);
    }

    Ok(exists)
}
