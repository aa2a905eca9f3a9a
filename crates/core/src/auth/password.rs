//! Password hashing with Argon2id.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use smartbudget_shared::AppError;
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Failed to hash password.
    #[error("failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password.
    #[error("failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format.
    #[error("invalid password hash format")]
    InvalidHash,
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        tracing::error!(error = %e, "password operation failed");
        match e {
            PasswordError::HashError(_) => Self::Internal("error hashing password".to_string()),
            PasswordError::VerifyError(_) | PasswordError::InvalidHash => {
                Self::Internal("error verifying password".to_string())
            }
        }
    }
}

/// Hashes a password using Argon2id, returning a PHC string.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails.
///
/// # Example
///
/// ```
/// use smartbudget_core::auth::hash_password;
///
/// let hash = hash_password("1234").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored PHC hash.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the hash format is invalid.
/// Returns `PasswordError::VerifyError` if verification fails unexpectedly.
///
/// # Example
///
/// ```
/// use smartbudget_core::auth::{hash_password, verify_password};
///
/// let hash = hash_password("1234").unwrap();
/// assert!(verify_password("1234", &hash).unwrap());
/// assert!(!verify_password("4321", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_argon2id() {
        let hash = hash_password("1234").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "1234");
    }

    #[test]
    fn test_verify_roundtrip() {
        let hash = hash_password("senha-forte").unwrap();

        assert!(verify_password("senha-forte", &hash).unwrap());
        assert!(!verify_password("senha-fraca", &hash).unwrap());
    }

    #[test]
    fn test_salted_hashes_differ() {
        assert_ne!(hash_password("1234").unwrap(), hash_password("1234").unwrap());
    }

    #[test]
    fn test_invalid_hash_format() {
        let result = verify_password("1234", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    #[test]
    fn test_password_error_is_internal() {
        let error: AppError = PasswordError::InvalidHash.into();
        assert!(error.is_server_error());
    }

    #[test]
    fn test_password_error_hides_details() {
        let verify: AppError = PasswordError::VerifyError("argon2 internals".into()).into();
        let hash: AppError = PasswordError::HashError("argon2 internals".into()).into();

        assert_eq!(
            verify,
            AppError::Internal("error verifying password".to_string())
        );
        assert_eq!(hash, AppError::Internal("error hashing password".to_string()));
    }

    #[test]
    fn test_corrupt_stored_hash_hides_details() {
        let error: AppError = verify_password("1234", "not-a-phc-string")
            .unwrap_err()
            .into();

        assert_eq!(
            error,
            AppError::Internal("error verifying password".to_string())
        );
    }
}
