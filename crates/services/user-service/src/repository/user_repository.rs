//! In-memory user repository.
//!
//! The store keeps records in insertion order and maintains an email index
//! alongside them. Every mutation, including its uniqueness check, runs under
//! a single write lock.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{user_not_found_message, CreateUser, UpdateUser, User, MSG_EMAIL_TAKEN};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users in insertion order
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Get user by ID, failing with `NotFound` when absent
    async fn get_by_id(&self, id: Uuid) -> AppResult<User>;

    /// Create a new user, failing with `Conflict` when the email is taken
    async fn create(&self, input: CreateUser) -> AppResult<User>;

    /// Merge the supplied fields into an existing user
    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// Remove user by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Remove every user
    async fn clear(&self) -> AppResult<()>;
}

/// Records plus the email index, mutated together.
#[derive(Debug, Default)]
struct UserCollection {
    users: Vec<User>,
    emails: HashMap<String, Uuid>,
}

impl UserCollection {
    fn position(&self, id: Uuid) -> Option<usize> {
        self.users.iter().position(|u| u.id == id)
    }

    fn get(&self, id: Uuid) -> AppResult<&User> {
        self.position(id)
            .map(|index| &self.users[index])
            .ok_or_not_found(user_not_found_message(id))
    }

    fn insert(&mut self, input: CreateUser) -> AppResult<User> {
        if self.emails.contains_key(&input.email) {
            return Err(AppError::conflict(MSG_EMAIL_TAKEN));
        }

        let user = User::new(Uuid::new_v4(), input.name, input.email);
        self.emails.insert(user.email.clone(), user.id);
        self.users.push(user.clone());
        Ok(user)
    }

    fn update(&mut self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let index = self
            .position(id)
            .ok_or_not_found(user_not_found_message(id))?;

        let previous_email = self.users[index].email.clone();
        let new_email = changes
            .email
            .as_ref()
            .filter(|email| **email != previous_email)
            .cloned();

        if let Some(email) = &new_email {
            if self.emails.get(email).is_some_and(|owner| *owner != id) {
                return Err(AppError::conflict(MSG_EMAIL_TAKEN));
            }
        }

        let user = &mut self.users[index];
        user.apply(changes);

        if let Some(email) = new_email {
            self.emails.remove(&previous_email);
            self.emails.insert(email, id);
        }

        Ok(user.clone())
    }

    fn remove(&mut self, id: Uuid) -> AppResult<()> {
        let index = self
            .position(id)
            .ok_or_not_found(user_not_found_message(id))?;

        let user = self.users.remove(index);
        self.emails.remove(&user.email);
        Ok(())
    }

    fn clear(&mut self) {
        self.users.clear();
        self.emails.clear();
    }
}

/// Concrete implementation of UserRepository backed by process memory
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<UserCollection>,
}

impl InMemoryUserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        self.inner.read().await.get(id).cloned()
    }

    async fn create(&self, input: CreateUser) -> AppResult<User> {
        self.inner.write().await.insert(input)
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        self.inner.write().await.update(id, changes)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.inner.write().await.remove(id)
    }

    async fn clear(&self) -> AppResult<()> {
        self.inner.write().await.clear();
        Ok(())
    }
}
