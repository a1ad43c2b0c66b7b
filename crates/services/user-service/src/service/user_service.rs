//! User service - Handles user-related business logic.
//!
//! Invariants are enforced by the repository; this layer logs outcomes.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::AppResult;
use domain::{CreateUser, UpdateUser, User};

use crate::repository::{InMemoryUserStore, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users in insertion order
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Create a new user (input already shape-validated)
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Update user details; absent fields are left untouched
    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// Permanently delete user
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Remove every user (test/admin affordance)
    async fn clear_users(&self) -> AppResult<()>;
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

    /// Create a user service over a fresh, empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryUserStore::new()))
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.get_by_id(id).await
    }

    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let user = self.repo.create(input).await.inspect_err(|e| {
            tracing::debug!(error = %e, "User creation rejected");
        })?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let user = self.repo.update(id, changes).await.inspect_err(|e| {
            tracing::debug!(user_id = %id, error = %e, "User update rejected");
        })?;

        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn clear_users(&self) -> AppResult<()> {
        self.repo.clear().await?;

        tracing::warn!("All users cleared");
        Ok(())
    }
}
