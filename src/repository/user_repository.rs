//! PostgreSQL user repository.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{RequestContext, User, UserId};
use crate::error::{AppError, AppResult};

use super::{bounded, collect_rows, UserRepository};

// table users: id, name, surname, inserted_at, updated_at

/// Concrete implementation of UserRepository backed by a connection pool
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgUserRepository {
    /// Create new repository instance; `timeout` bounds every store call
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

/// Translate the store's empty-result signal into the taxonomy
fn translate(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::RowNotFound => AppError::NoRows,
        other => AppError::Database(other),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn exists(&self, ctx: &RequestContext, id: UserId) -> AppResult<bool> {
        bounded(ctx, self.timeout, |_| async move {
            let exists: bool = sqlx::query_scalar(
                r#"
                SELECT EXISTS (
                    SELECT 1 FROM users WHERE id = $1
                )
                "#,
            )
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

            Ok(exists)
        })
        .await
    }

    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        bounded(ctx, self.timeout, |scope| async move {
            let rows = sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, surname, inserted_at, updated_at
                FROM users
                ORDER BY inserted_at ASC, id ASC
                "#,
            )
            .fetch(&self.pool);

            collect_rows(&scope, rows).await
        })
        .await
    }

    async fn get(&self, ctx: &RequestContext, id: UserId) -> AppResult<User> {
        bounded(ctx, self.timeout, |_| async move {
            sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, surname, inserted_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(translate)
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
            sqlx::query("INSERT INTO users (name, surname) VALUES ($1, $2)")
                .bind(&name)
                .bind(&surname)
                .execute(&self.pool)
                .await?;

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
            let result = sqlx::query(
                r#"
                UPDATE users
                SET name = $2, surname = $3, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(id)
            .bind(&name)
            .bind(&surname)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                tracing::debug!(user_id = id, "update matched no rows");
            }

            Ok(())
        })
        .await
    }
}
