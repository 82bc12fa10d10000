//! PostgreSQL repository integration tests
//!
//! Require a reachable database in DATABASE_URL.
//! Run with: cargo test -- --ignored

use std::sync::Arc;
use std::time::Duration;

use user_registry::repository::{PgUserRepository, UserRepository};
use user_registry::service::{UserManager, UserService};
use user_registry::{AppError, RequestContext};

mod common;

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_scenario() {
    let pool = common::setup_test_db().await;
    let users = UserManager::new(Arc::new(PgUserRepository::new(pool, Duration::from_secs(30))));
    let ctx = RequestContext::new();

    let n = users.list_users(&ctx).await.unwrap().len();

    // create
    users
        .create_user(&ctx, "John".to_string(), Some("Smith".to_string()))
        .await
        .unwrap();

    let list = users.list_users(&ctx).await.unwrap();
    assert_eq!(list.len(), n + 1, "user creation does not work");

    let id = list.last().unwrap().id;
    let user = users.get_user(&ctx, id).await.unwrap();
    assert_eq!(user.name, "John");
    assert_eq!(user.surname.as_deref(), Some("Smith"));
    assert!(user.updated_at.is_none());

    // update
    users
        .update_user(&ctx, id, "Kevin".to_string(), Some("Tierney".to_string()))
        .await
        .unwrap();

    let user = users.get_user(&ctx, id).await.unwrap();
    assert_eq!(user.name, "Kevin");
    assert_eq!(user.surname.as_deref(), Some("Tierney"));
    assert!(user.updated_at.is_some());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_repository_not_found_semantics() {
    let pool = common::setup_test_db().await;
    let repo = PgUserRepository::new(pool, Duration::from_secs(30));
    let ctx = RequestContext::new();

    assert!(!repo.exists(&ctx, 999_999).await.unwrap());
    assert!(matches!(repo.get(&ctx, 999_999).await, Err(AppError::NoRows)));

    // update of an unknown id is a silent no-op at this layer
    repo.update(&ctx, 999_999, "Ghost".to_string(), None).await.unwrap();
    assert!(repo.list(&ctx).await.unwrap().iter().all(|u| u.name != "Ghost"));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_cancelled_context_aborts_list() {
    let pool = common::setup_test_db().await;
    let repo = PgUserRepository::new(pool, Duration::from_secs(30));
    let ctx = RequestContext::new();

    repo.create(&ctx, "Ada".to_string(), None).await.unwrap();
    ctx.cancel();

    assert!(matches!(repo.list(&ctx).await, Err(AppError::Cancelled)));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_breaks_timestamp_ties_by_id() {
    let pool = common::setup_test_db().await;
    sqlx::query(
        "INSERT INTO users (name, inserted_at) VALUES ('A', '2024-01-01T00:00:00Z'), ('B', '2024-01-01T00:00:00Z'), ('C', '2024-01-01T00:00:00Z')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let repo = PgUserRepository::new(pool, Duration::from_secs(30));
    let ctx = RequestContext::new();

    let names: Vec<String> = repo
        .list(&ctx)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.name)
        .filter(|n| ["A", "B", "C"].contains(&n.as_str()))
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}
