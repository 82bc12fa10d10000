//! Data Access module
//!
//! Repository contract plus the bounded-call helpers every store call goes
//! through: a per-call timeout and cooperative cancellation.

mod user_repository;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, TryStreamExt};

use crate::domain::{RequestContext, User, UserId};
use crate::error::{AppError, AppResult};

pub use user_repository::PgUserRepository;

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// `update` performs no existence check; an unknown id affects zero rows
/// and still succeeds.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// True iff a row with this id exists
    async fn exists(&self, ctx: &RequestContext, id: UserId) -> AppResult<bool>;

    /// All users ordered by insertion time, oldest first
    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<User>>;

    /// Fetch one user; `AppError::NoRows` when it does not exist
    async fn get(&self, ctx: &RequestContext, id: UserId) -> AppResult<User>;

    async fn create(
        &self,
        ctx: &RequestContext,
        name: String,
        surname: Option<String>,
    ) -> AppResult<()>;

    async fn update(
        &self,
        ctx: &RequestContext,
        id: UserId,
        name: String,
        surname: Option<String>,
    ) -> AppResult<()>;
}

/// Run one store call inside a sub-scope of `ctx`, bounded by `timeout`.
///
/// The sub-scope is released when the call finishes. Timeout expiry maps to
/// `DeadlineExceeded`, caller cancellation to `Cancelled`.
pub async fn bounded<T, F, Fut>(ctx: &RequestContext, timeout: Duration, call: F) -> AppResult<T>
where
    F: FnOnce(RequestContext) -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let scope = ctx.scope();
    let _release = scope.cancel_on_drop();

    tokio::select! {
        biased;
        _ = scope.cancelled() => Err(AppError::Cancelled),
        result = tokio::time::timeout(timeout, call(scope.clone())) => match result {
            Ok(outcome) => outcome,
            Err(_) => Err(AppError::DeadlineExceeded(timeout)),
        },
    }
}

/// Drain a row stream, checking for cancellation between row reads.
pub async fn collect_rows<T, S>(ctx: &RequestContext, rows: S) -> AppResult<Vec<T>>
where
    S: Stream<Item = Result<T, sqlx::Error>>,
{
    let mut rows = std::pin::pin!(rows);
    let mut result = Vec::new();

    loop {
        let next = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(AppError::Cancelled),
            next = rows.try_next() => next?,
        };

        match next {
            Some(row) => result.push(row),
            None => return Ok(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{stream, StreamExt};

    #[tokio::test(start_paused = true)]
    async fn test_bounded_returns_outcome() {
        let ctx = RequestContext::new();
        let value = bounded(&ctx, Duration::from_secs(30), |_| async { Ok(42) })
            .await
            .unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_times_out() {
        let ctx = RequestContext::new();
        let result: AppResult<()> = bounded(&ctx, Duration::from_secs(30), |_| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(AppError::DeadlineExceeded(d)) if d == Duration::from_secs(30)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_observes_cancellation() {
        let ctx = RequestContext::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });

        let result: AppResult<()> = bounded(&ctx, Duration::from_secs(30), |_| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[tokio::test]
    async fn test_bounded_releases_scope_but_not_caller() {
        let ctx = RequestContext::new();
        let mut seen = None;
        bounded(&ctx, Duration::from_secs(1), |scope| {
            seen = Some(scope.clone());
            async { Ok(()) }
        })
        .await
        .unwrap();

        assert!(seen.unwrap().is_cancelled());
        assert!(!ctx.is_cancelled());
    }

    #[tokio::test]
    async fn test_bounded_propagates_store_errors() {
        let ctx = RequestContext::new();
        let result: AppResult<()> =
            bounded(&ctx, Duration::from_secs(1), |_| async { Err(AppError::NoRows) }).await;
        assert!(matches!(result, Err(AppError::NoRows)));
    }

    #[tokio::test]
    async fn test_collect_rows_in_order() {
        let ctx = RequestContext::new();
        let rows = stream::iter(vec![Ok(1), Ok(2), Ok(3)]);
        assert_eq!(collect_rows(&ctx, rows).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_collect_rows_empty() {
        let ctx = RequestContext::new();
        let rows = stream::iter(Vec::<Result<i32, sqlx::Error>>::new());
        assert!(collect_rows(&ctx, rows).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_collect_rows_aborts_mid_iteration() {
        let ctx = RequestContext::new();
        let canceller = ctx.clone();
        let rows = stream::iter(1..=5).map(move |n| {
            if n == 2 {
                canceller.cancel();
            }
            Ok::<_, sqlx::Error>(n)
        });

        let result = collect_rows(&ctx, rows).await;
        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[tokio::test]
    async fn test_collect_rows_surfaces_row_errors() {
        let ctx = RequestContext::new();
        let rows = stream::iter(vec![Ok(1), Err(sqlx::Error::PoolClosed)]);
        let result = collect_rows(&ctx, rows).await;
        assert!(matches!(result, Err(AppError::Database(sqlx::Error::PoolClosed))));
    }
}
