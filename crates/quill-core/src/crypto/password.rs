//! Password validation.
//!
//! Enforces the minimum length a journal password must have before any
//! entry is sealed with it.

use crate::error::{QuillError, Result};

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Validate that a password meets the minimum length.
///
/// Length is counted in characters, not bytes, so multi-byte passwords are
/// judged by what the user typed.
///
/// # Examples
///
/// ```
/// use quill_core::crypto::validate_password;
///
/// assert!(validate_password("hunter2").is_ok());
/// assert!(validate_password("abc").is_err());
/// ```
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(QuillError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}
