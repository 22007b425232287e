//! Error types for Quill core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.
//!
//! Forgetting the password of an encrypted journal has no error variant:
//! there is no decryption path at all, and the only way forward is
//! [`crate::lock::LockController::reset`], which discards the data.

use thiserror::Error;

/// Result type alias for Quill operations.
pub type Result<T> = std::result::Result<T, QuillError>;

/// Core error type for Quill operations.
#[derive(Debug, Error)]
pub enum QuillError {
    /// Password shorter than the policy minimum
    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    /// Unlock failed: the password is wrong or an entry was corrupted
    #[error("Incorrect password")]
    IncorrectPassword,

    /// A single record failed authenticated decryption
    #[error("Authentication failed: incorrect password or corrupted data")]
    AuthenticationFailure,

    /// Persisted data could not be parsed into the expected shape
    #[error("Malformed data: {0}")]
    MalformedData(String),

    /// Encryption machinery error (RNG, cipher setup, worker failure)
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// The journal is encrypted and has not been unlocked
    #[error("Journal is locked")]
    Locked,

    /// Operation not valid in the current lock state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Entry not found by ID
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}
