//! User data model.

use chrono::{DateTime, Utc};

use super::validation::{check_name, check_password_length, ValidationError};
use super::{Password, UserId};

/// Application user.
///
/// `id` is [`UserId::UNSET`] until the user has been stored. `updated_at` is
/// populated by the repository on every write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub password: Password,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Build a user that has not been stored yet.
    ///
    /// # Examples
    /// ```
    /// use company_api::domain::{Password, User};
    ///
    /// let user = User::new("Bob", Password::hashed("qwerty123").expect("hash"));
    /// assert!(user.is_valid_for_create());
    /// assert!(!user.is_valid_for_update());
    /// ```
    pub fn new(name: impl Into<String>, password: Password) -> Self {
        Self {
            id: UserId::UNSET,
            name: name.into(),
            password,
            updated_at: None,
        }
    }

    /// Replace the identifier.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }

    /// Check the fields required to insert the user.
    ///
    /// # Errors
    /// Returns the first failing field rule.
    pub fn validate_for_create(&self) -> Result<(), ValidationError> {
        check_name(&self.name)?;
        check_password_length(self.password.length())
    }

    /// Check the fields required to update an existing user.
    ///
    /// # Errors
    /// Returns [`ValidationError::UnassignedId`] when `id` is not positive, or
    /// the first failing field rule.
    pub fn validate_for_update(&self) -> Result<(), ValidationError> {
        if !self.id.is_assigned() {
            return Err(ValidationError::UnassignedId);
        }
        self.validate_for_create()
    }

    /// Whether the user may be inserted.
    #[must_use]
    pub fn is_valid_for_create(&self) -> bool {
        self.validate_for_create().is_ok()
    }

    /// Whether the user may overwrite a stored row.
    #[must_use]
    pub fn is_valid_for_update(&self) -> bool {
        self.validate_for_update().is_ok()
    }
}
