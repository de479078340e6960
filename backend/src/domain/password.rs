//! Salted password hashes.
//!
//! A [`Password`] never keeps the plaintext. Fresh passwords are hashed with
//! Argon2id and remember the plaintext length so the validity predicate can
//! check it; passwords rehydrated from storage only carry the PHC string.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::validation::PASSWORD_MIN_CHARS;

/// Rendering used wherever a password would otherwise be shown.
pub const MASKED_PASSWORD: &str = "*****";

/// Raised when the hasher rejects its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Opaque password capability.
#[derive(Clone, PartialEq, Eq)]
pub enum Password {
    /// Freshly hashed from a plaintext supplied by the caller.
    Hashed { phc: String, length: usize },
    /// Rehydrated from a stored hash; the plaintext length is unknown.
    FromHash { phc: String },
}

impl Password {
    /// Hash `plaintext` with a random salt.
    ///
    /// # Errors
    /// Returns [`PasswordHashError`] when Argon2 rejects the input.
    ///
    /// # Examples
    /// ```
    /// use company_api::domain::Password;
    ///
    /// let password = Password::hashed("correct horse").expect("hash");
    /// assert!(password.verify("correct horse"));
    /// assert_eq!(password.length(), 13);
    /// assert_eq!(password.to_string(), "*****");
    /// ```
    pub fn hashed(plaintext: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| PasswordHashError {
                message: err.to_string(),
            })?
            .to_string();
        Ok(Self::Hashed {
            phc,
            length: plaintext.chars().count(),
        })
    }

    /// Wrap a hash read back from storage.
    pub fn from_hash(phc: impl Into<String>) -> Self {
        Self::FromHash { phc: phc.into() }
    }

    /// Check `plaintext` against the stored hash. Malformed hashes never match.
    #[must_use]
    pub fn verify(&self, plaintext: &str) -> bool {
        PasswordHash::new(self.phc())
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plaintext.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Plaintext length in characters.
    ///
    /// Rehydrated passwords report the minimum accepted length because the
    /// stored hash was validated when it was created.
    #[must_use]
    pub fn length(&self) -> usize {
        match self {
            Self::Hashed { length, .. } => *length,
            Self::FromHash { .. } => PASSWORD_MIN_CHARS,
        }
    }

    /// Raw hash bytes in PHC string format.
    #[must_use]
    pub fn hash(&self) -> &[u8] {
        self.phc().as_bytes()
    }

    /// Hash in PHC string format, as persisted.
    #[must_use]
    pub fn phc(&self) -> &str {
        match self {
            Self::Hashed { phc, .. } | Self::FromHash { phc } => phc.as_str(),
        }
    }
}

impl std::fmt::Display for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(MASKED_PASSWORD)
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Password({MASKED_PASSWORD})")
    }
}
