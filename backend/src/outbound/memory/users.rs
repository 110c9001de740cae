//! In-memory user store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, UserId};

/// User store held in process memory.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Build an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.lock().expect("user store poisoned");
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.lock().expect("user store poisoned");
        Ok(users.get(user_id).cloned())
    }

    async fn count(&self) -> Result<u64, UserRepositoryError> {
        let users = self.users.lock().expect("user store poisoned");
        Ok(users.len() as u64)
    }
}
