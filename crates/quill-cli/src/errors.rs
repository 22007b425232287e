//! CLI error classification and exit codes.

use std::fmt;

use quill_core::QuillError;

use crate::constants::{exit_codes, FORGOTTEN_PASSWORD_HINT};

/// A user-facing failure with an exit code and optional hint.
#[derive(Debug)]
pub struct CliError {
    message: String,
    hint: Option<String>,
    exit_code: i32,
}

impl CliError {
    fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            hint: None,
            exit_code,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, exit_codes::NOT_FOUND)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(message, exit_codes::INVALID_INPUT)
    }

    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self::new(message, exit_codes::AUTH_FAILED)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Classify a core error, if it has a dedicated exit code.
    pub fn from_core(err: &QuillError) -> Option<Self> {
        let classified = match err {
            QuillError::EntryNotFound(id) => Self::not_found(format!("Entry not found: {}", id)),
            QuillError::WeakPassword { .. }
            | QuillError::InvalidInput(_)
            | QuillError::InvalidState(_) => Self::invalid_input(err.to_string()),
            QuillError::IncorrectPassword | QuillError::AuthenticationFailure => {
                Self::auth_failed("Incorrect password.").with_hint(FORGOTTEN_PASSWORD_HINT)
            }
            QuillError::Locked => Self::auth_failed("Journal is locked.")
                .with_hint("Set QUILL_PASSWORD or run from a terminal to be prompted."),
            _ => return None,
        };
        Some(classified)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Message, hint and exit code for any error reaching `main`.
pub fn classify(err: &anyhow::Error) -> (String, Option<String>, i32) {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return (
            cli_err.to_string(),
            cli_err.hint().map(str::to_string),
            cli_err.exit_code(),
        );
    }
    if let Some(cli_err) = err.downcast_ref::<QuillError>().and_then(CliError::from_core) {
        return (
            cli_err.to_string(),
            cli_err.hint().map(str::to_string),
            cli_err.exit_code(),
        );
    }
    (format!("{:#}", err), None, exit_codes::GENERAL)
}
