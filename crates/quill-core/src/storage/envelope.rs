//! Serialized form of a journal collection.
//!
//! A collection is persisted as a JSON array under one key. The encryption
//! flag (stored separately) selects whether the array holds plain records
//! or encrypted envelopes. Byte fields use standard base64 and timestamps
//! are epoch milliseconds.
//!
//! Decoding is lenient about fields the journal never relied on (unknown
//! keys, unknown mood names, a missing title). A record whose crypto fields
//! cannot be decoded is kept as an envelope that never opens, so a damaged
//! record fails unlock like a wrong password instead of silently dropping
//! the rest of the collection.

use std::collections::BTreeSet;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::crypto::{NONCE_LENGTH, SALT_LENGTH};
use crate::error::{QuillError, Result};
use crate::storage::types::{Collection, EncryptedEnvelope, Mood, PlainEntry};

const UNTITLED: &str = "Untitled";

/// Wire form of a [`PlainEntry`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlainRecord {
    id: String,
    title: String,
    body: String,
    #[serde(default, deserialize_with = "known_moods")]
    mood_tags: Vec<Mood>,
    created_at: i64,
}

/// Wire form of an [`EncryptedEnvelope`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRecord {
    id: String,
    #[serde(default)]
    plain_title: Option<String>,
    cipher_text: String,
    salt: String,
    iv: String,
    #[serde(default, deserialize_with = "known_moods")]
    mood_tags: Vec<Mood>,
    created_at: i64,
    #[serde(default = "default_encrypted")]
    is_encrypted: bool,
}

fn default_encrypted() -> bool {
    true
}

/// Keep recognised mood names, drop anything else.
fn known_moods<'de, D>(deserializer: D) -> std::result::Result<Vec<Mood>, D::Error>
where
    D: Deserializer<'de>,
{
    let names: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(names
        .unwrap_or_default()
        .iter()
        .filter_map(|name| name.parse::<Mood>().ok())
        .collect())
}

fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| QuillError::MalformedData(format!("Timestamp out of range: {}", millis)))
}

fn decode_fixed<const N: usize>(field: &str, value: &str) -> Result<[u8; N]> {
    let bytes = STANDARD
        .decode(value)
        .map_err(|e| QuillError::MalformedData(format!("Invalid base64 in {}: {}", field, e)))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        QuillError::MalformedData(format!(
            "Invalid {} length: expected {} bytes, got {}",
            field,
            N,
            bytes.len()
        ))
    })
}

impl From<&PlainEntry> for PlainRecord {
    fn from(entry: &PlainEntry) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            body: entry.body.clone(),
            mood_tags: entry.mood_tags.iter().copied().collect(),
            created_at: entry.created_at.timestamp_millis(),
        }
    }
}

impl TryFrom<PlainRecord> for PlainEntry {
    type Error = QuillError;

    fn try_from(record: PlainRecord) -> Result<Self> {
        Ok(PlainEntry {
            id: record.id,
            title: record.title,
            body: record.body,
            mood_tags: record.mood_tags.into_iter().collect::<BTreeSet<_>>(),
            created_at: timestamp_from_millis(record.created_at)?,
        })
    }
}

impl From<&EncryptedEnvelope> for EnvelopeRecord {
    fn from(envelope: &EncryptedEnvelope) -> Self {
        Self {
            id: envelope.id.clone(),
            plain_title: Some(envelope.plain_title.clone()),
            cipher_text: STANDARD.encode(&envelope.cipher_text),
            salt: STANDARD.encode(envelope.salt),
            iv: STANDARD.encode(envelope.nonce),
            mood_tags: envelope.mood_tags.iter().copied().collect(),
            created_at: envelope.created_at.timestamp_millis(),
            is_encrypted: envelope.is_encrypted,
        }
    }
}

/// Decoded `cipherText`, `salt` and `iv` of a record.
type CryptoFields = (Vec<u8>, [u8; SALT_LENGTH], [u8; NONCE_LENGTH]);

fn crypto_fields(record: &EnvelopeRecord) -> Result<CryptoFields> {
    if !record.is_encrypted {
        return Err(QuillError::MalformedData(
            "record is not encrypted inside an encrypted collection".to_string(),
        ));
    }
    let cipher_text = STANDARD.decode(&record.cipher_text).map_err(|e| {
        QuillError::MalformedData(format!("Invalid base64 in cipherText: {}", e))
    })?;
    let salt = decode_fixed::<SALT_LENGTH>("salt", &record.salt)?;
    let nonce = decode_fixed::<NONCE_LENGTH>("iv", &record.iv)?;
    Ok((cipher_text, salt, nonce))
}

impl TryFrom<EnvelopeRecord> for EncryptedEnvelope {
    type Error = QuillError;

    fn try_from(record: EnvelopeRecord) -> Result<Self> {
        let created_at = timestamp_from_millis(record.created_at)?;
        // An empty ciphertext is shorter than the GCM tag and never authenticates.
        let (cipher_text, salt, nonce) = crypto_fields(&record).unwrap_or_else(|err| {
            tracing::warn!(id = %record.id, error = %err, "envelope cannot be opened");
            (Vec::new(), [0u8; SALT_LENGTH], [0u8; NONCE_LENGTH])
        });

        Ok(EncryptedEnvelope {
            id: record.id,
            plain_title: record
                .plain_title
                .unwrap_or_else(|| UNTITLED.to_string()),
            cipher_text,
            salt,
            nonce,
            mood_tags: record.mood_tags.into_iter().collect(),
            created_at,
            is_encrypted: true,
        })
    }
}

/// Serialize a collection for the persistence surface.
pub fn encode(collection: &Collection) -> Result<String> {
    let raw = match collection {
        Collection::Plain(entries) => {
            let records: Vec<PlainRecord> = entries.iter().map(PlainRecord::from).collect();
            serde_json::to_string(&records)?
        }
        Collection::Encrypted(envelopes) => {
            let records: Vec<EnvelopeRecord> =
                envelopes.iter().map(EnvelopeRecord::from).collect();
            serde_json::to_string(&records)?
        }
    };
    Ok(raw)
}

/// Parse a persisted blob into the shape selected by `encrypted`.
///
/// # Errors
///
/// Returns `QuillError::MalformedData` if the blob is not a JSON array of
/// the expected records or a timestamp is out of range.
pub fn decode(raw: &str, encrypted: bool) -> Result<Collection> {
    if encrypted {
        let records: Vec<EnvelopeRecord> = serde_json::from_str(raw)
            .map_err(|e| QuillError::MalformedData(format!("Invalid envelope list: {}", e)))?;
        let envelopes = records
            .into_iter()
            .map(EncryptedEnvelope::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Collection::Encrypted(envelopes))
    } else {
        let records: Vec<PlainRecord> = serde_json::from_str(raw)
            .map_err(|e| QuillError::MalformedData(format!("Invalid entry list: {}", e)))?;
        let entries = records
            .into_iter()
            .map(PlainEntry::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Collection::Plain(entries))
    }
}
