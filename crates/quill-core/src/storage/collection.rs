//! Namespace-scoped journal collection with bulk re-encryption.
//!
//! The store never keeps entries itself: callers hand in the current
//! in-memory collection and get the updated one back after it has been
//! persisted. Every write computes the complete serialized blob first and
//! hands it to the key-value store in one call, so a failure while sealing
//! leaves the persisted state untouched.
//!
//! Sealing and opening are CPU-heavy (one key derivation per record). Each
//! record is processed on the tokio blocking pool; a batch completes only
//! when every record has, and fails as a whole on the first error.

use std::sync::Arc;

use tokio::task::JoinSet;
use zeroize::Zeroizing;

use crate::crypto::{open, seal, validate_password};
use crate::error::{QuillError, Result};
use crate::storage::envelope::{decode, encode};
use crate::storage::kv::{KeyValueStore, KvOp};
use crate::storage::namespace::Namespace;
use crate::storage::types::{Collection, EncryptedEnvelope, PlainEntry};

const FLAG_ENABLED: &str = "true";

/// Persisted journal of one namespace.
pub struct CollectionStore<S> {
    kv: S,
    namespace: Namespace,
}

impl<S: KeyValueStore> CollectionStore<S> {
    pub fn new(kv: S, namespace: Namespace) -> Self {
        Self { kv, namespace }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The underlying key-value store.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Read the persisted collection and encryption flag.
    ///
    /// Nothing is decrypted. An absent or unparseable blob yields an empty
    /// collection in the flagged mode so the journal stays usable after
    /// storage corruption.
    ///
    /// # Errors
    ///
    /// Only failures of the key-value store itself are returned.
    pub fn load(&self) -> Result<(Collection, bool)> {
        let encrypted = self
            .kv
            .get(&self.namespace.encryption_flag_key())?
            .is_some_and(|flag| flag == FLAG_ENABLED);

        let collection = match self.kv.get(&self.namespace.collection_key())? {
            None => Collection::empty(encrypted),
            Some(raw) => match decode(&raw, encrypted) {
                Ok(collection) => collection,
                Err(err) => {
                    tracing::warn!(
                        namespace = %self.namespace,
                        error = %err,
                        "discarding unreadable journal collection"
                    );
                    Collection::empty(encrypted)
                }
            },
        };

        tracing::debug!(
            namespace = %self.namespace,
            encrypted,
            records = collection.len(),
            "loaded journal collection"
        );
        Ok((collection, encrypted))
    }

    /// Seal every entry under `password` and switch the namespace to encrypted mode.
    ///
    /// # Errors
    ///
    /// Returns `QuillError::WeakPassword` if the password is too short. If any
    /// entry fails to seal, nothing is written.
    pub async fn enable_encryption(
        &self,
        password: &str,
        current: &[PlainEntry],
    ) -> Result<Vec<EncryptedEnvelope>> {
        validate_password(password)?;
        let envelopes = seal_all(password, current).await?;
        let raw = encode(&Collection::Encrypted(envelopes.clone()))?;

        self.kv.apply(&[
            KvOp::set(self.namespace.collection_key(), raw),
            KvOp::set(self.namespace.encryption_flag_key(), FLAG_ENABLED),
        ])?;
        tracing::debug!(namespace = %self.namespace, records = envelopes.len(), "encryption enabled");
        Ok(envelopes)
    }

    /// Open every envelope with `password`.
    ///
    /// # Errors
    ///
    /// Returns `QuillError::IncorrectPassword` if any single envelope fails
    /// authentication; no entries are returned in that case.
    pub async fn unlock(
        &self,
        password: &str,
        envelopes: &[EncryptedEnvelope],
    ) -> Result<Vec<PlainEntry>> {
        let password = Arc::new(Zeroizing::new(password.to_string()));
        let jobs: Vec<_> = envelopes
            .iter()
            .cloned()
            .map(|envelope| {
                let password = Arc::clone(&password);
                move || -> Result<PlainEntry> {
                    let body = open(
                        &envelope.cipher_text,
                        &envelope.salt,
                        &envelope.nonce,
                        &password,
                    )?;
                    Ok(PlainEntry {
                        id: envelope.id,
                        title: envelope.plain_title,
                        body,
                        mood_tags: envelope.mood_tags,
                        created_at: envelope.created_at,
                    })
                }
            })
            .collect();

        let entries = run_batch(jobs).await.map_err(|err| match err {
            QuillError::AuthenticationFailure => QuillError::IncorrectPassword,
            other => other,
        })?;
        tracing::debug!(namespace = %self.namespace, records = entries.len(), "journal unlocked");
        Ok(entries)
    }

    /// Insert or replace `entry` and persist the result.
    ///
    /// New entries are prepended; an existing entry keeps its position and
    /// its original creation time. With `Some(password)` the whole resulting
    /// collection is re-sealed with fresh salts and nonces.
    pub async fn save(
        &self,
        entry: PlainEntry,
        current: &[PlainEntry],
        password: Option<&str>,
    ) -> Result<Vec<PlainEntry>> {
        let mut updated = current.to_vec();
        match updated.iter_mut().find(|existing| existing.id == entry.id) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = entry;
                existing.created_at = created_at;
            }
            None => updated.insert(0, entry),
        }

        self.persist(&updated, password).await?;
        Ok(updated)
    }

    /// Remove the entry with `id` and persist the result.
    pub async fn delete(
        &self,
        id: &str,
        current: &[PlainEntry],
        password: Option<&str>,
    ) -> Result<Vec<PlainEntry>> {
        let updated: Vec<PlainEntry> = current
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();

        self.persist(&updated, password).await?;
        Ok(updated)
    }

    /// Re-seal every entry under a new password.
    ///
    /// Same policy and atomicity as [`CollectionStore::enable_encryption`].
    pub async fn change_password(
        &self,
        new_password: &str,
        current: &[PlainEntry],
    ) -> Result<Vec<EncryptedEnvelope>> {
        self.enable_encryption(new_password, current).await
    }

    /// Write `current` in clear and drop the encryption flag.
    pub fn disable_encryption(&self, current: &[PlainEntry]) -> Result<()> {
        let raw = encode(&Collection::Plain(current.to_vec()))?;
        self.kv.apply(&[
            KvOp::set(self.namespace.collection_key(), raw),
            KvOp::remove(self.namespace.encryption_flag_key()),
        ])?;
        tracing::debug!(namespace = %self.namespace, records = current.len(), "encryption disabled");
        Ok(())
    }

    /// Irrecoverably discard the collection and its encryption flag.
    pub fn reset(&self) -> Result<()> {
        self.kv.apply(&[
            KvOp::remove(self.namespace.collection_key()),
            KvOp::remove(self.namespace.encryption_flag_key()),
        ])?;
        tracing::debug!(namespace = %self.namespace, "journal reset");
        Ok(())
    }

    async fn persist(&self, entries: &[PlainEntry], password: Option<&str>) -> Result<()> {
        let collection = match password {
            Some(password) => Collection::Encrypted(seal_all(password, entries).await?),
            None => Collection::Plain(entries.to_vec()),
        };
        let raw = encode(&collection)?;
        self.kv.set(&self.namespace.collection_key(), &raw)
    }
}

/// Seal every body under `password`, keeping order.
async fn seal_all(password: &str, entries: &[PlainEntry]) -> Result<Vec<EncryptedEnvelope>> {
    let password = Arc::new(Zeroizing::new(password.to_string()));
    let jobs: Vec<_> = entries
        .iter()
        .cloned()
        .map(|entry| {
            let password = Arc::clone(&password);
            move || -> Result<EncryptedEnvelope> {
                let body = Zeroizing::new(entry.body);
                let sealed = seal(&body, &password)?;
                Ok(EncryptedEnvelope {
                    id: entry.id,
                    plain_title: entry.title,
                    cipher_text: sealed.cipher_text,
                    salt: sealed.salt,
                    nonce: sealed.nonce,
                    mood_tags: entry.mood_tags,
                    created_at: entry.created_at,
                    is_encrypted: true,
                })
            }
        })
        .collect();

    run_batch(jobs).await
}

/// Run independent jobs on the blocking pool and collect results in input order.
///
/// Returns the first error any job reports. Blocking jobs cannot be
/// interrupted once running, so after a failure the jobs that have not
/// started are cancelled and the running ones are awaited before returning.
async fn run_batch<T, F>(jobs: Vec<F>) -> Result<Vec<T>>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let total = jobs.len();
    let mut set = JoinSet::new();
    for (index, job) in jobs.into_iter().enumerate() {
        set.spawn_blocking(move || (index, job()));
    }

    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(total).collect();
    let mut failure = None;
    while let Some(joined) = set.join_next().await {
        if failure.is_some() {
            continue;
        }
        let outcome = joined
            .map_err(|e| QuillError::Crypto(format!("Crypto worker failed: {}", e)))
            .and_then(|(index, outcome)| outcome.map(|value| (index, value)));
        match outcome {
            Ok((index, value)) => slots[index] = Some(value),
            Err(err) => {
                set.abort_all();
                failure = Some(err);
            }
        }
    }
    if let Some(err) = failure {
        return Err(err);
    }

    slots
        .into_iter()
        .map(|slot| {
            slot.ok_or_else(|| QuillError::Crypto("Crypto worker result missing".to_string()))
        })
        .collect()
}
