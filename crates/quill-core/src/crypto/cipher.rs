//! Per-record authenticated encryption.
//!
//! Each entry body is sealed independently with AES-256-GCM under a key
//! derived from the password and a fresh random salt. A fresh random nonce
//! is drawn for every seal, so re-sealing an unchanged body never reuses
//! key/nonce material.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};

use super::key::{derive_key, SALT_LENGTH};
use crate::error::{QuillError, Result};

/// Length of the AES-GCM nonce in bytes.
pub const NONCE_LENGTH: usize = 12;

/// Output of [`seal`]: everything needed to open the body again, except the password.
#[derive(Clone, PartialEq, Eq)]
pub struct SealedBody {
    /// Ciphertext with the 16-byte GCM tag appended
    pub cipher_text: Vec<u8>,
    pub salt: [u8; SALT_LENGTH],
    pub nonce: [u8; NONCE_LENGTH],
}

impl std::fmt::Debug for SealedBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealedBody")
            .field("cipher_text_len", &self.cipher_text.len())
            .finish_non_exhaustive()
    }
}

/// Encrypt `plaintext` under `password` with fresh salt and nonce.
///
/// # Errors
///
/// Returns `QuillError::Crypto` if the OS random source is unavailable or
/// the cipher rejects the input.
///
/// # Examples
///
/// ```
/// use quill_core::crypto::{open, seal};
///
/// let sealed = seal("dear diary", "hunter2").unwrap();
/// let body = open(&sealed.cipher_text, &sealed.salt, &sealed.nonce, "hunter2").unwrap();
/// assert_eq!(body, "dear diary");
/// ```
pub fn seal(plaintext: &str, password: &str) -> Result<SealedBody> {
    let mut salt = [0u8; SALT_LENGTH];
    let mut nonce = [0u8; NONCE_LENGTH];
    getrandom::getrandom(&mut salt)
        .map_err(|e| QuillError::Crypto(format!("Failed to generate salt: {}", e)))?;
    getrandom::getrandom(&mut nonce)
        .map_err(|e| QuillError::Crypto(format!("Failed to generate nonce: {}", e)))?;

    let key = derive_key(password, &salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let cipher_text = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|e| QuillError::Crypto(format!("Encryption failed: {}", e)))?;

    Ok(SealedBody {
        cipher_text,
        salt,
        nonce,
    })
}

/// Decrypt a body sealed by [`seal`].
///
/// # Errors
///
/// Returns `QuillError::AuthenticationFailure` if the password is wrong,
/// the ciphertext or tag was modified, or the recovered bytes are not
/// UTF-8. These cases are intentionally indistinguishable.
pub fn open(
    cipher_text: &[u8],
    salt: &[u8; SALT_LENGTH],
    nonce: &[u8; NONCE_LENGTH],
    password: &str,
) -> Result<String> {
    let key = derive_key(password, salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), cipher_text)
        .map_err(|_| QuillError::AuthenticationFailure)?;

    String::from_utf8(plaintext).map_err(|_| QuillError::AuthenticationFailure)
}
