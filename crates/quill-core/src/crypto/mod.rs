//! Cryptographic operations for Quill.
//!
//! This module provides key derivation and per-record authenticated
//! encryption using well-audited RustCrypto crates:
//! - **PBKDF2-HMAC-SHA256**: slow, salted key derivation (100,000 rounds)
//! - **AES-256-GCM**: authenticated encryption of entry bodies
//!
//! ## Security Model
//!
//! - Every sealed body carries its own random salt and nonce
//! - Wrong password and corrupted ciphertext are the same failure
//! - Derived keys are zeroized from memory on drop
//! - Passwords are never stored
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft or inspection of the persisted journal store
//! - Offline brute-force attacks on the password
//! - Tampering with sealed bodies (detected, never silently decrypted)
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked session / memory
//! - Disclosure of titles, mood tags or timestamps (stored in clear)

pub mod cipher;
pub mod key;
pub mod password;

pub use cipher::{open, seal, SealedBody, NONCE_LENGTH};
pub use key::{derive_key, DerivedKey, KDF_ITERATIONS, SALT_LENGTH};
pub use password::{validate_password, MIN_PASSWORD_LENGTH};
