//! Authentication rules.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - The password policy applied on password changes
//! - The cooldown between password recovery emails

mod password;
mod recovery;

pub use password::{PasswordError, hash_password, verify_password};
pub use recovery::{RECOVERY_COOLDOWN, recovery_cooldown_active};

use smartbudget_shared::AppError;

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Checks a submitted new password and returns it.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the password is missing, empty, or
/// shorter than [`MIN_PASSWORD_LENGTH`].
pub fn validate_new_password(password: Option<&str>) -> Result<&str, AppError> {
    let password = match password {
        Some(p) if !p.is_empty() => p,
        _ => return Err(AppError::BadRequest("password not sent".to_string())),
    };

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(password)
}
