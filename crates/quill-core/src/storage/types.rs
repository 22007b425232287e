//! Core data types for the journal store.
//!
//! These are the in-memory shapes; the persisted layout lives in
//! [`crate::storage::envelope`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::{NONCE_LENGTH, SALT_LENGTH};
use crate::error::QuillError;

/// Mood tags a user can attach to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mood {
    Calm,
    Anxious,
    Sad,
    Happy,
    Stressed,
    Grateful,
    Tired,
    Energetic,
}

impl Mood {
    /// Every mood, in display order.
    pub const ALL: [Mood; 8] = [
        Mood::Calm,
        Mood::Anxious,
        Mood::Sad,
        Mood::Happy,
        Mood::Stressed,
        Mood::Grateful,
        Mood::Tired,
        Mood::Energetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Calm => "Calm",
            Mood::Anxious => "Anxious",
            Mood::Sad => "Sad",
            Mood::Happy => "Happy",
            Mood::Stressed => "Stressed",
            Mood::Grateful => "Grateful",
            Mood::Tired => "Tired",
            Mood::Energetic => "Energetic",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = QuillError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                QuillError::InvalidInput(format!(
                    "Unknown mood \"{}\" (expected one of: {})",
                    value,
                    Mood::ALL.map(|m| m.as_str()).join(", ")
                ))
            })
    }
}

/// A journal entry as the user sees it.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainEntry {
    /// Opaque identifier, stable for the entry's lifetime
    pub id: String,

    /// Short title (never encrypted)
    pub title: String,

    /// Free text; the only encrypted field
    pub body: String,

    /// Mood tags (order irrelevant)
    pub mood_tags: BTreeSet<Mood>,

    /// When this entry was created (millisecond precision)
    pub created_at: DateTime<Utc>,
}

impl PlainEntry {
    /// Create a new entry with a fresh ID and the current time.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: title.into(),
            body: body.into(),
            mood_tags: BTreeSet::new(),
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_moods(mut self, moods: impl IntoIterator<Item = Mood>) -> Self {
        self.mood_tags = moods.into_iter().collect();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at.trunc_subsecs(3);
        self
    }
}

impl fmt::Debug for PlainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainEntry")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("body", &format_args!("[{} chars]", self.body.chars().count()))
            .field("mood_tags", &self.mood_tags)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// At-rest form of an entry when encryption is enabled.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedEnvelope {
    pub id: String,

    /// Title, stored in clear
    pub plain_title: String,

    /// AES-GCM ciphertext of the body, tag appended
    pub cipher_text: Vec<u8>,

    pub salt: [u8; SALT_LENGTH],

    pub nonce: [u8; NONCE_LENGTH],

    pub mood_tags: BTreeSet<Mood>,

    pub created_at: DateTime<Utc>,

    pub is_encrypted: bool,
}

impl fmt::Debug for EncryptedEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedEnvelope")
            .field("id", &self.id)
            .field("plain_title", &self.plain_title)
            .field("cipher_text_len", &self.cipher_text.len())
            .field("mood_tags", &self.mood_tags)
            .field("created_at", &self.created_at)
            .field("is_encrypted", &self.is_encrypted)
            .finish()
    }
}

/// All records of one namespace, in one representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    Plain(Vec<PlainEntry>),
    Encrypted(Vec<EncryptedEnvelope>),
}

impl Collection {
    /// An empty collection matching the given encryption mode.
    pub fn empty(encrypted: bool) -> Self {
        if encrypted {
            Collection::Encrypted(Vec::new())
        } else {
            Collection::Plain(Vec::new())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::Plain(entries) => entries.len(),
            Collection::Encrypted(envelopes) => envelopes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_encrypted(&self) -> bool {
        matches!(self, Collection::Encrypted(_))
    }
}

/// Filter for browsing readable entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Case-insensitive substring of title + body
    pub query: Option<String>,

    /// Entries must carry this mood
    pub mood: Option<Mood>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `entry` passes this filter (ignores `limit`).
    pub fn matches(&self, entry: &PlainEntry) -> bool {
        let matches_query = match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => format!("{}{}", entry.title, entry.body)
                .to_lowercase()
                .contains(&query.to_lowercase()),
        };
        let matches_mood = self
            .mood
            .map(|mood| entry.mood_tags.contains(&mood))
            .unwrap_or(true);
        matches_query && matches_mood
    }

    /// Apply the filter to `entries`, keeping their order.
    pub fn apply<'a>(&self, entries: &'a [PlainEntry]) -> Vec<&'a PlainEntry> {
        let matching = entries.iter().filter(|entry| self.matches(entry));
        match self.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }
}
