//! In-memory user store.
//!
//! Backs the reference server and the test suite. Not a persistence
//! layer; contents are lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AuthResult;
use crate::storage::user::{User, UserStore};

/// `UserStore` backed by a `HashMap` behind an async `RwLock`.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user, keyed by id.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Applies a mutation to the stored user, if present.
    ///
    /// Returns `true` if the user existed. Role or enabled-flag changes
    /// made here are visible to the next refresh, which always re-reads
    /// the live record.
    pub async fn update<F>(&self, id: Uuid, mutate: F) -> bool
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                mutate(user);
                true
            }
            None => false,
        }
    }

    /// Removes a user by id, returning it if present.
    pub async fn remove(&self, id: Uuid) -> Option<User> {
        self.users.write().await.remove(&id)
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns `true` if the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }
}
