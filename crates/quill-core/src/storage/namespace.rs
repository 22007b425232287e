//! Per-user key layout in the persistence surface.

use std::fmt;

/// Identifier used when no user is signed in.
pub const GUEST_ID: &str = "guest";

const PREFIX: &str = "quill.journal";

/// Selects which collection and encryption flag belong to a user or guest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Namespace for an optional user identifier; blank or missing falls back to guest.
    pub fn for_user(user_id: Option<&str>) -> Self {
        let id = user_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(GUEST_ID);
        Self(format!("{}.{}", PREFIX, id))
    }

    pub fn guest() -> Self {
        Self::for_user(None)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key holding the serialized collection.
    pub fn collection_key(&self) -> String {
        format!("{}.collection", self.0)
    }

    /// Key holding the `"true"` encryption flag.
    pub fn encryption_flag_key(&self) -> String {
        format!("{}.encryptionEnabled", self.0)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
