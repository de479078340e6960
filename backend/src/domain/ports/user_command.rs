//! Driving ports for user accounts.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Name and plaintext password supplied on signup or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub name: String,
    pub password: String,
}

/// Mutating user operations.
///
/// `requester` is the caller's identity; implementations reject any request
/// where it does not match the target user before touching storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Register a new user.
    async fn create(&self, credentials: UserCredentials) -> Result<User, Error>;

    /// Replace the name and password of `id`.
    async fn update(
        &self,
        requester: UserId,
        id: UserId,
        credentials: UserCredentials,
    ) -> Result<User, Error>;

    /// Remove `id`.
    async fn delete(&self, requester: UserId, id: UserId) -> Result<(), Error>;
}

/// Read-only user operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Fetch `id` on behalf of `requester`.
    async fn get(&self, requester: UserId, id: UserId) -> Result<User, Error>;
}
