//! Port for user persistence.

use async_trait::async_trait;

use crate::domain::{DomainError, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            connection, "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            query, "user repository query failed: {message}",
    }
}

impl From<UserRepositoryError> for DomainError {
    fn from(err: UserRepositoryError) -> Self {
        DomainError::service_unavailable(err.to_string())
    }
}

/// Port for writing and reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a user.
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Find a user by id.
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Total number of users.
    async fn count(&self) -> Result<u64, UserRepositoryError>;
}
