//! Password hashing and verification via Argon2.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed")]
    Hash(#[source] argon2::password_hash::Error),

    #[error("stored password hash is malformed")]
    MalformedHash(#[source] argon2::password_hash::Error),
}

/// Hash a plain-text password with a fresh random salt.
///
/// # Errors
///
/// Returns an error when the hashing process itself fails.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hashed| hashed.to_string())
        .map_err(PasswordError::Hash)
}

/// Verify a plain-text password against a stored hash.
///
/// A mismatch is `Ok(false)`, not an error; errors mean the stored hash
/// could not be processed at all.
///
/// # Errors
///
/// Returns an error when the stored hash cannot be parsed or verification
/// fails for a reason other than a mismatch.
pub fn verify(stored_hash: &str, password: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(error) => Err(PasswordError::Hash(error)),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hash_then_verify_round_trip() -> TestResult {
        let hashed = hash("correct horse battery staple")?;

        assert!(verify(&hashed, "correct horse battery staple")?);
        assert!(!verify(&hashed, "wrong password")?);

        Ok(())
    }

    #[test]
    fn hashes_are_salted() -> TestResult {
        let first = hash("swordfish")?;
        let second = hash("swordfish")?;

        assert_ne!(first, second, "two hashes of one password must differ");

        Ok(())
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let result = verify("not-a-phc-string", "anything");

        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }
}
