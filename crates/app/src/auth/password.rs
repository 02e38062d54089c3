//! Argon2 password hashing.

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(password_hash::Error),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(password_hash::Error),
}

/// Hash a plain-text password into an argon2id PHC string.
///
/// # Errors
///
/// Returns an error when argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

static DUMMY_PASSWORD_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Run a full argon2 verification against a throwaway hash.
///
/// Used when no account matches, so an unknown username costs the same as a
/// wrong password.
pub fn verify_dummy_password(password: &str) {
    let Some(hash) = DUMMY_PASSWORD_HASH
        .get_or_init(|| hash_password("dummy-password-never-matches").ok())
        .as_deref()
    else {
        return;
    };

    if let Err(error) = verify_password(password, hash) {
        debug!(%error, "dummy password verification failed");
    }
}

/// Check a plain-text password against a stored PHC string.
///
/// # Errors
///
/// Returns an error when the stored hash cannot be parsed or verification
/// fails for a reason other than a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(PasswordError::Hash(error)),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hashed_password_verifies() -> TestResult {
        let hash = hash_password("correct horse")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash)?);
        assert!(!verify_password("battery staple", &hash)?);

        Ok(())
    }

    #[test]
    fn same_password_gets_distinct_salts() -> TestResult {
        assert_ne!(hash_password("secret1")?, hash_password("secret1")?);

        Ok(())
    }

    #[test]
    fn dummy_verification_prepares_a_real_hash() {
        verify_dummy_password("whatever");

        assert!(
            DUMMY_PASSWORD_HASH
                .get()
                .and_then(Option::as_deref)
                .is_some_and(|hash| hash.starts_with("$argon2id$")),
            "dummy hash should be a real argon2id hash"
        );
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("secret1", "not-a-phc-string"),
            Err(PasswordError::MalformedHash(_))
        ));
    }
}
