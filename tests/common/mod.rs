//! Common test utilities

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use user_registry::repository::{bounded, UserRepository};
use user_registry::{AppError, AppResult, RequestContext, User, UserId};

/// In-memory repository with the same contract as the PostgreSQL one
pub struct MemoryUserRepository {
    rows: Mutex<Vec<User>>,
    timeout: Duration,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn exists(&self, ctx: &RequestContext, id: UserId) -> AppResult<bool> {
        bounded(ctx, self.timeout, |_| async move {
            Ok(self.rows.lock().unwrap().iter().any(|u| u.id == id))
        })
        .await
    }

    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        bounded(ctx, self.timeout, |_| async move {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by_key(|u| (u.inserted_at, u.id));
            Ok(rows)
        })
        .await
    }

    async fn get(&self, ctx: &RequestContext, id: UserId) -> AppResult<User> {
        bounded(ctx, self.timeout, |_| async move {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == id)
                .cloned()
                .ok_or(AppError::NoRows)
        })
        .await
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        name: String,
        surname: Option<String>,
    ) -> AppResult<()> {
        bounded(ctx, self.timeout, |_| async move {
            let mut rows = self.rows.lock().unwrap();
            let id = rows.iter().map(|u| u.id).max().unwrap_or(0) + 1;
            rows.push(User {
                id,
                name,
                surname,
                inserted_at: Utc::now(),
                updated_at: None,
            });
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: UserId,
        name: String,
        surname: Option<String>,
    ) -> AppResult<()> {
        bounded(ctx, self.timeout, |_| async move {
            if let Some(user) = self.rows.lock().unwrap().iter_mut().find(|u| u.id == id) {
                user.name = name;
                user.surname = surname;
                user.updated_at = Some(Utc::now());
            }
            Ok(())
        })
        .await
    }
}

/// Setup test database - create the schema and truncate the users table
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    pool.execute(include_str!("../../migrations/0001_create_users.sql"))
        .await
        .expect("Failed to apply schema");

    sqlx::query("TRUNCATE TABLE users RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    pool
}
