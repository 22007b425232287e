//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// 0 is success and 1 an unclassified error; application-specific
/// codes start at 3.
pub mod exit_codes {
    /// Unclassified failure.
    pub const GENERAL: i32 = 1;

    /// Resource not found (config, entry).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or an operation the journal state does not allow.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong password, too many attempts).
    pub const AUTH_FAILED: i32 = 5;
}

/// Environment variables read by the CLI.
pub mod env {
    pub const CONFIG: &str = "QUILL_CONFIG";
    pub const PASSWORD: &str = "QUILL_PASSWORD";
    pub const NEW_PASSWORD: &str = "QUILL_NEW_PASSWORD";
    pub const LOG: &str = "QUILL_LOG";
}

/// Password prompts allowed per command on a terminal.
pub const MAX_PASSWORD_ATTEMPTS: u32 = 3;

/// Rows shown by `list` without `--limit`.
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Minimum id prefix shown in pretty tables.
pub const SHORT_ID_MIN: usize = 8;

/// Hint shown whenever a password cannot be verified.
pub const FORGOTTEN_PASSWORD_HINT: &str =
    "There is no password recovery. `quill reset` erases the journal so you can start over.";

/// Shown when an entry mentions self-harm. Never blocks the save.
pub const SUPPORT_NOTICE: &str = "You are not alone. Help is available. \
Call or text 988 (USA/Canada) or 111 (UK), or contact local emergency services \
if you are in danger.";
