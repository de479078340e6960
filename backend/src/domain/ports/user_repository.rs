//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// An update or delete matched no row.
        NotFound { id: i64 } => "user {id} not found",
        /// A unique column already holds the submitted value.
        Duplicate { field: String } => "user {field} is already taken",
    }
}

/// Storage for [`User`] records.
///
/// Writes run inside a database transaction that is rolled back when the
/// statement fails or touches an unexpected number of rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its generated id and timestamp.
    ///
    /// Fails with [`UserPersistenceError::Duplicate`] when the name is taken.
    async fn create(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite the name and password of an existing user.
    ///
    /// Fails with [`UserPersistenceError::NotFound`] when no row matches and
    /// [`UserPersistenceError::Duplicate`] when the new name is taken.
    async fn update(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Remove a user together with the companies they own, including those
    /// companies' roles.
    ///
    /// Fails with [`UserPersistenceError::NotFound`] when no row matches.
    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
