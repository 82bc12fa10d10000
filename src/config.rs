//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment profile (dev, test, prod)
    pub profile: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Enable the CORS layer on API routes
    pub cors_enabled: bool,

    /// Allowed CORS origins
    pub cors_allow_origins: Vec<String>,

    pub database: DatabaseConfig,

    /// Log level (debug, info, warn, error, fatal)
    pub log_level: String,
}

/// Store connection parameters
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Explicit connection URL; takes precedence over the individual parts
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    /// Schema the `users` table is expected in
    pub schema: String,
    /// Maximum connections in pool
    pub max_connections: u32,
    /// Per-call store timeout
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("APP_PORT", "8080")
            .parse()
            .map_err(|_| ConfigError::InvalidValue("APP_PORT"))?;

        let cors_enabled = var("SECURITY_CORS_ENABLED", "false")
            .parse()
            .map_err(|_| ConfigError::InvalidValue("SECURITY_CORS_ENABLED"))?;

        let cors_allow_origins = var("SECURITY_CORS_ALLOW_ORIGINS", "")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let db_port = var("DB_PORT", "5432")
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DB_PORT"))?;

        let max_connections = var("DB_LIMIT", "20")
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DB_LIMIT"))?;

        let timeout_secs: u64 = var("DB_TIMEOUT", "30")
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DB_TIMEOUT"))?;

        let log_level = var("LOG_LEVEL", "INFO").to_lowercase();
        if !matches!(log_level.as_str(), "debug" | "info" | "warn" | "error" | "fatal") {
            return Err(ConfigError::InvalidValue("LOG_LEVEL"));
        }

        Ok(Self {
            profile: var("APP_PROFILE", "test"),
            host: var("APP_HOST", "localhost"),
            port,
            cors_enabled,
            cors_allow_origins,
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
                host: var("DB_HOST", "postgres"),
                port: db_port,
                name: var("DB_NAME", "postgres"),
                user: var("DB_USER", "postgres"),
                password: var("DB_PASS", "test"),
                schema: var("DB_SCHEMA", "public"),
                max_connections,
                timeout: Duration::from_secs(timeout_secs),
            },
            log_level,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.profile == "prod"
    }

    /// Tracing filter directive derived from `LOG_LEVEL`
    pub fn log_filter(&self) -> String {
        let level = match self.log_level.as_str() {
            "fatal" => "error",
            other => other,
        };
        format!("user_registry={level},tower_http={level}")
    }

    /// Log the effective configuration without secrets
    pub fn log_summary(&self) {
        tracing::info!(
            profile = %self.profile,
            host = %self.host,
            port = self.port,
            cors_enabled = self.cors_enabled,
            cors_allow_origins = ?self.cors_allow_origins,
            db_host = %self.database.host,
            db_port = self.database.port,
            db_name = %self.database.name,
            db_schema = %self.database.schema,
            db_limit = self.database.max_connections,
            db_timeout_secs = self.database.timeout.as_secs(),
            log_level = %self.log_level,
            "Configuration loaded"
        );
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
