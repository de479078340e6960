//! Field-level validation rules shared by users and companies.

use serde_json::json;

use super::Error;

/// Longest accepted name, in characters.
pub const NAME_MAX_CHARS: usize = 255;
/// Shortest accepted password, in characters.
pub const PASSWORD_MIN_CHARS: usize = 8;
/// Longest accepted password, in characters.
pub const PASSWORD_MAX_CHARS: usize = 255;

/// Reasons an entity fails its validity predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("password must be at most {max} characters")]
    PasswordTooLong { max: usize },
    #[error("id must be a positive integer")]
    UnassignedId,
    #[error("owner id must be a positive integer")]
    UnassignedOwner,
}

impl ValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::PasswordTooShort { .. } | Self::PasswordTooLong { .. } => "password",
            Self::UnassignedId => "id",
            Self::UnassignedOwner => "ownerId",
        }
    }

    /// Stable machine-readable code for the failure.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::PasswordTooLong { .. } => "password_too_long",
            Self::UnassignedId => "unassigned_id",
            Self::UnassignedOwner => "unassigned_owner",
        }
    }
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

pub(crate) fn check_name(name: &str) -> Result<(), ValidationError> {
    let length = name.chars().count();
    if length == 0 {
        return Err(ValidationError::EmptyName);
    }
    if length > NAME_MAX_CHARS {
        return Err(ValidationError::NameTooLong {
            max: NAME_MAX_CHARS,
        });
    }
    Ok(())
}

pub(crate) fn check_password_length(length: usize) -> Result<(), ValidationError> {
    if length < PASSWORD_MIN_CHARS {
        return Err(ValidationError::PasswordTooShort {
            min: PASSWORD_MIN_CHARS,
        });
    }
    if length > PASSWORD_MAX_CHARS {
        return Err(ValidationError::PasswordTooLong {
            max: PASSWORD_MAX_CHARS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(8)]
    #[case(255)]
    fn names_within_bounds_pass(#[case] length: usize) {
        assert!(check_name(&"a".repeat(length)).is_ok());
    }

    #[rstest]
    #[case(0, ValidationError::EmptyName)]
    #[case(256, ValidationError::NameTooLong { max: 255 })]
    #[case(1000, ValidationError::NameTooLong { max: 255 })]
    fn names_out_of_bounds_fail(#[case] length: usize, #[case] expected: ValidationError) {
        assert_eq!(check_name(&"a".repeat(length)), Err(expected));
    }

    #[rstest]
    fn name_length_counts_characters_not_bytes() {
        assert!(check_name(&"管".repeat(255)).is_ok());
    }

    #[rstest]
    #[case(7, Err(ValidationError::PasswordTooShort { min: 8 }))]
    #[case(8, Ok(()))]
    #[case(255, Ok(()))]
    #[case(256, Err(ValidationError::PasswordTooLong { max: 255 }))]
    fn password_length_bounds(
        #[case] length: usize,
        #[case] expected: Result<(), ValidationError>,
    ) {
        assert_eq!(check_password_length(length), expected);
    }

    #[rstest]
    fn converts_to_invalid_request_with_field_details() {
        let error = Error::from(ValidationError::PasswordTooShort { min: 8 });
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "password");
        assert_eq!(details["code"], "password_too_short");
    }
}
