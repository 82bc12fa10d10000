//! User service
//!
//! Get and update are existence-gated: the repository's `exists` is consulted
//! first so an unknown id yields `UserNotFound` rather than a raw store
//! result. The repository's update never checks existence itself, so this
//! gate must stay here.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{RequestContext, User, UserId};
use crate::error::{AppError, AppResult};
use crate::repository::UserRepository;

#[cfg(test)]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// All users, oldest first
    async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, ctx: &RequestContext, id: UserId) -> AppResult<User>;

    /// Create a new user; names need not be unique
    async fn create_user(
        &self,
        ctx: &RequestContext,
        name: String,
        surname: Option<String>,
    ) -> AppResult<()>;

    /// Overwrite name and surname of an existing user
    async fn update_user(
        &self,
        ctx: &RequestContext,
        id: UserId,
        name: String,
        surname: Option<String>,
    ) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn ensure_exists(&self, ctx: &RequestContext, id: UserId) -> AppResult<()> {
        if self.repo.exists(ctx, id).await? {
            Ok(())
        } else {
            Err(AppError::UserNotFound)
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        self.repo.list(ctx).await
    }

    async fn get_user(&self, ctx: &RequestContext, id: UserId) -> AppResult<User> {
        self.ensure_exists(ctx, id).await?;
        self.repo.get(ctx, id).await
    }

    async fn create_user(
        &self,
        ctx: &RequestContext,
        name: String,
        surname: Option<String>,
    ) -> AppResult<()> {
        self.repo.create(ctx, name, surname).await
    }

    async fn update_user(
        &self,
        ctx: &RequestContext,
        id: UserId,
        name: String,
        surname: Option<String>,
    ) -> AppResult<()> {
        self.ensure_exists(ctx, id).await?;
        self.repo.update(ctx, id, name, surname).await
    }
}
