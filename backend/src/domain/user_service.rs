//! User account domain service.
//!
//! Implements the user driving ports: authorises the caller, validates the
//! entity, then delegates to the [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    UserCommand, UserCredentials, UserPersistenceError, UserQuery, UserRepository,
};
use crate::domain::validation::{check_name, check_password_length};
use crate::domain::{Error, Password, User, UserId, ValidationError};

/// User service implementing [`UserCommand`] and [`UserQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(operation: &str, error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => Error::service_unavailable(format!(
                "{operation}: user repository unavailable: {message}"
            )),
            UserPersistenceError::Query { message } => {
                Error::internal(format!("{operation}: user repository error: {message}"))
            }
            UserPersistenceError::NotFound { id } => {
                Error::not_found(format!("user {id} not found"))
            }
            UserPersistenceError::Duplicate { field } => {
                Error::invalid_request(format!("user {field} is already taken"))
                    .with_details(json!({ "field": field, "code": "already_taken" }))
            }
        }
    }

    /// Users may only act on their own account.
    fn authorize(requester: UserId, id: UserId) -> Result<(), Error> {
        if !requester.is_assigned() {
            return Err(Error::unauthorized("caller identity is required"));
        }
        if requester != id {
            return Err(Error::forbidden(format!(
                "user {requester} may not access user {id}"
            )));
        }
        Ok(())
    }

    /// Validate the plaintext fields, then hash the password off the async
    /// worker.
    async fn build_user(credentials: UserCredentials) -> Result<User, Error> {
        let UserCredentials { name, password } = credentials;
        check_name(&name)?;
        check_password_length(password.chars().count())?;
        let password = tokio::task::spawn_blocking(move || Password::hashed(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(|err| Error::internal(err.to_string()))?;
        Ok(User::new(name, password))
    }
}

#[async_trait]
impl<R> UserCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create(&self, credentials: UserCredentials) -> Result<User, Error> {
        let user = Self::build_user(credentials).await?;
        user.validate_for_create()?;
        self.repo
            .create(&user)
            .await
            .map_err(|err| Self::map_persistence_error("create user", err))
    }

    async fn update(
        &self,
        requester: UserId,
        id: UserId,
        credentials: UserCredentials,
    ) -> Result<User, Error> {
        Self::authorize(requester, id)?;
        let user = Self::build_user(credentials).await?.with_id(id);
        user.validate_for_update()?;
        self.repo
            .update(&user)
            .await
            .map_err(|err| Self::map_persistence_error("update user", err))
    }

    async fn delete(&self, requester: UserId, id: UserId) -> Result<(), Error> {
        Self::authorize(requester, id)?;
        if !id.is_assigned() {
            return Err(ValidationError::UnassignedId.into());
        }
        self.repo
            .delete(id)
            .await
            .map_err(|err| Self::map_persistence_error("delete user", err))
    }
}

#[async_trait]
impl<R> UserQuery for UserService<R>
where
    R: UserRepository,
{
    async fn get(&self, requester: UserId, id: UserId) -> Result<User, Error> {
        Self::authorize(requester, id)?;
        self.repo
            .find_by_id(id)
            .await
            .map_err(|err| Self::map_persistence_error("read user", err))?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
