//! Lock lifecycle of a journal session.
//!
//! ```text
//!                enable_encryption
//!  NoEncryption ------------------> Unlocked <----+
//!       ^  ^                         |   ^        | unlock
//!       |  |    disable_encryption   |   |        |
//!       |  +-------------------------+   |      Locked
//!       |                            lock|        ^
//!       |                                +--------+
//!       +----------- reset (from any state) ------+
//! ```
//!
//! While unlocked the controller keeps the password for the lifetime of the
//! session so that every save can re-seal the collection. It is dropped on
//! `lock`, `reset`, `disable_encryption` and when the controller is dropped.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{QuillError, Result};
use crate::storage::collection::CollectionStore;
use crate::storage::kv::KeyValueStore;
use crate::storage::types::{Collection, EncryptedEnvelope, EntryFilter, PlainEntry};

/// Where a journal session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// Entries are stored and shown in clear.
    NoEncryption,
    /// Entries are encrypted and nothing has been decrypted yet.
    Locked,
    /// Entries are encrypted at rest and decrypted in memory.
    Unlocked,
}

impl LockState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockState::NoEncryption => "unencrypted",
            LockState::Locked => "locked",
            LockState::Unlocked => "unlocked",
        }
    }
}

/// A journal session bound to one namespace.
pub struct LockController<S> {
    store: CollectionStore<S>,
    state: LockState,
    entries: Vec<PlainEntry>,
    envelopes: Vec<EncryptedEnvelope>,
    session: Option<SecretString>,
}

impl<S: KeyValueStore> LockController<S> {
    /// Load the namespace and start in `NoEncryption` or `Locked`.
    pub fn open(store: CollectionStore<S>) -> Result<Self> {
        let (collection, _) = store.load()?;
        let mut controller = Self {
            store,
            state: LockState::NoEncryption,
            entries: Vec::new(),
            envelopes: Vec::new(),
            session: None,
        };
        controller.adopt(collection);
        Ok(controller)
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn is_encryption_enabled(&self) -> bool {
        self.state != LockState::NoEncryption
    }

    pub fn store(&self) -> &CollectionStore<S> {
        &self.store
    }

    /// Number of entries, available in every state.
    pub fn entry_count(&self) -> usize {
        match self.state {
            LockState::Locked => self.envelopes.len(),
            _ => self.entries.len(),
        }
    }

    /// Titles of encrypted entries, readable without the password.
    pub fn locked_titles(&self) -> impl Iterator<Item = &str> {
        self.envelopes.iter().map(|e| e.plain_title.as_str())
    }

    /// All entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `QuillError::Locked` until the journal is unlocked.
    pub fn entries(&self) -> Result<&[PlainEntry]> {
        self.ensure_readable()?;
        Ok(&self.entries)
    }

    /// Entries matching `filter`, in collection order.
    pub fn filtered(&self, filter: &EntryFilter) -> Result<Vec<&PlainEntry>> {
        self.ensure_readable()?;
        Ok(filter.apply(&self.entries))
    }

    /// Look up a single entry.
    pub fn get(&self, id: &str) -> Result<&PlainEntry> {
        self.ensure_readable()?;
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| QuillError::EntryNotFound(id.to_string()))
    }

    /// Encrypt the existing journal under `password`.
    pub async fn enable_encryption(&mut self, password: &str) -> Result<()> {
        if self.state != LockState::NoEncryption {
            return Err(QuillError::InvalidState(
                "Encryption is already enabled".to_string(),
            ));
        }
        self.store.enable_encryption(password, &self.entries).await?;
        self.session = Some(SecretString::from(password.to_string()));
        self.transition(LockState::Unlocked);
        Ok(())
    }

    /// Decrypt every entry with `password`.
    ///
    /// # Errors
    ///
    /// Returns `QuillError::IncorrectPassword` if any entry fails to open;
    /// the controller stays locked.
    pub async fn unlock(&mut self, password: &str) -> Result<()> {
        if self.state != LockState::Locked {
            return Err(QuillError::InvalidState(format!(
                "Cannot unlock a journal that is {}",
                self.state.as_str()
            )));
        }
        let entries = self.store.unlock(password, &self.envelopes).await?;
        self.entries = entries;
        self.envelopes.clear();
        self.session = Some(SecretString::from(password.to_string()));
        self.transition(LockState::Unlocked);
        Ok(())
    }

    /// Forget decrypted entries and the session password.
    pub fn lock(&mut self) -> Result<()> {
        if self.state != LockState::Unlocked {
            return Err(QuillError::InvalidState(format!(
                "Cannot lock a journal that is {}",
                self.state.as_str()
            )));
        }
        let (collection, _) = self.store.load()?;
        self.session = None;
        self.adopt(collection);
        Ok(())
    }

    /// Discard the journal and return to `NoEncryption`.
    ///
    /// This is the only way out of a forgotten password.
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset()?;
        self.entries.clear();
        self.envelopes.clear();
        self.session = None;
        self.transition(LockState::NoEncryption);
        Ok(())
    }

    /// Create or replace an entry and persist the journal.
    pub async fn save(&mut self, entry: PlainEntry) -> Result<()> {
        let password = self.write_password()?;
        let updated = self.store.save(entry, &self.entries, password).await?;
        self.entries = updated;
        Ok(())
    }

    /// Delete an entry and persist the journal.
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        let password = self.write_password()?;
        if !self.entries.iter().any(|entry| entry.id == id) {
            return Err(QuillError::EntryNotFound(id.to_string()));
        }
        let updated = self.store.delete(id, &self.entries, password).await?;
        self.entries = updated;
        Ok(())
    }

    /// Re-seal the journal under `new_password`.
    pub async fn change_password(&mut self, new_password: &str) -> Result<()> {
        self.ensure_unlocked("change the password of")?;
        self.store
            .change_password(new_password, &self.entries)
            .await?;
        self.session = Some(SecretString::from(new_password.to_string()));
        tracing::debug!(namespace = %self.store.namespace(), "password changed");
        Ok(())
    }

    /// Store the journal in clear again.
    pub fn disable_encryption(&mut self) -> Result<()> {
        self.ensure_unlocked("disable encryption of")?;
        self.store.disable_encryption(&self.entries)?;
        self.session = None;
        self.transition(LockState::NoEncryption);
        Ok(())
    }

    fn adopt(&mut self, collection: Collection) {
        match collection {
            Collection::Plain(entries) => {
                self.entries = entries;
                self.envelopes.clear();
                self.transition(LockState::NoEncryption);
            }
            Collection::Encrypted(envelopes) => {
                self.entries.clear();
                self.envelopes = envelopes;
                self.transition(LockState::Locked);
            }
        }
    }

    fn transition(&mut self, next: LockState) {
        if self.state != next {
            tracing::debug!(
                namespace = %self.store.namespace(),
                from = self.state.as_str(),
                to = next.as_str(),
                "lock state changed"
            );
        }
        self.state = next;
    }

    fn ensure_readable(&self) -> Result<()> {
        if self.state == LockState::Locked {
            return Err(QuillError::Locked);
        }
        Ok(())
    }

    fn ensure_unlocked(&self, action: &str) -> Result<()> {
        match self.state {
            LockState::Unlocked => Ok(()),
            LockState::Locked => Err(QuillError::Locked),
            LockState::NoEncryption => Err(QuillError::InvalidState(format!(
                "Cannot {} a journal that is not encrypted",
                action
            ))),
        }
    }

    /// Password for re-sealing on write, `None` when stored in clear.
    fn write_password(&self) -> Result<Option<&str>> {
        match self.state {
            LockState::NoEncryption => Ok(None),
            LockState::Locked => Err(QuillError::Locked),
            LockState::Unlocked => self
                .session
                .as_ref()
                .map(|secret| Some(secret.expose_secret()))
                .ok_or_else(|| QuillError::InvalidState("Session password missing".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryStore;
    use crate::storage::namespace::Namespace;
    use crate::storage::types::Mood;
    use std::sync::Arc;

    fn open(kv: &Arc<MemoryStore>) -> LockController<Arc<MemoryStore>> {
        LockController::open(CollectionStore::new(Arc::clone(kv), Namespace::guest())).unwrap()
    }

    #[tokio::test]
    async fn test_fresh_journal_is_unencrypted() {
        let kv = Arc::new(MemoryStore::new());
        let controller = open(&kv);
        assert_eq!(controller.state(), LockState::NoEncryption);
        assert!(controller.entries().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let kv = Arc::new(MemoryStore::new());
        let mut controller = open(&kv);

        controller
            .save(PlainEntry::new("A", "hello").with_id("a").with_moods([Mood::Calm]))
            .await
            .unwrap();
        controller.enable_encryption("hunter2").await.unwrap();
        assert_eq!(controller.state(), LockState::Unlocked);

        controller
            .save(PlainEntry::new("B", "world").with_id("b"))
            .await
            .unwrap();
        controller.lock().unwrap();
        assert_eq!(controller.state(), LockState::Locked);
        assert_eq!(controller.entry_count(), 2);
        assert!(matches!(controller.entries(), Err(QuillError::Locked)));
        assert_eq!(controller.locked_titles().collect::<Vec<_>>(), ["B", "A"]);

        let mut reopened = open(&kv);
        assert_eq!(reopened.state(), LockState::Locked);
        reopened.unlock("hunter2").await.unwrap();
        let bodies: Vec<&str> = reopened
            .entries()
            .unwrap()
            .iter()
            .map(|e| e.body.as_str())
            .collect();
        assert_eq!(bodies, ["world", "hello"]);
    }

    #[tokio::test]
    async fn test_wrong_password_stays_locked() {
        let kv = Arc::new(MemoryStore::new());
        let mut controller = open(&kv);
        controller
            .save(PlainEntry::new("A", "hello"))
            .await
            .unwrap();
        controller.enable_encryption("hunter2").await.unwrap();

        let mut reopened = open(&kv);
        let result = reopened.unlock("hunter3").await;
        assert!(matches!(result, Err(QuillError::IncorrectPassword)));
        assert_eq!(reopened.state(), LockState::Locked);

        reopened.unlock("hunter2").await.unwrap();
        assert_eq!(reopened.entries().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_locked_writes_are_refused() {
        let kv = Arc::new(MemoryStore::new());
        let mut controller = open(&kv);
        controller.enable_encryption("hunter2").await.unwrap();
        controller.lock().unwrap();

        assert!(matches!(
            controller.save(PlainEntry::new("x", "y")).await,
            Err(QuillError::Locked)
        ));
        assert!(matches!(
            controller.delete("x").await,
            Err(QuillError::Locked)
        ));
        assert!(matches!(
            controller.change_password("another").await,
            Err(QuillError::Locked)
        ));
    }

    #[tokio::test]
    async fn test_invalid_transitions() {
        let kv = Arc::new(MemoryStore::new());
        let mut controller = open(&kv);

        assert!(matches!(
            controller.unlock("hunter2").await,
            Err(QuillError::InvalidState(_))
        ));
        assert!(matches!(controller.lock(), Err(QuillError::InvalidState(_))));
        assert!(matches!(
            controller.disable_encryption(),
            Err(QuillError::InvalidState(_))
        ));

        controller.enable_encryption("hunter2").await.unwrap();
        assert!(matches!(
            controller.enable_encryption("hunter2").await,
            Err(QuillError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_weak_password_keeps_journal_plain() {
        let kv = Arc::new(MemoryStore::new());
        let mut controller = open(&kv);
        controller.save(PlainEntry::new("A", "B")).await.unwrap();

        let result = controller.enable_encryption("abc").await;
        assert!(matches!(result, Err(QuillError::WeakPassword { .. })));
        assert_eq!(controller.state(), LockState::NoEncryption);
        assert_eq!(open(&kv).state(), LockState::NoEncryption);
    }

    #[tokio::test]
    async fn test_delete_unknown_entry() {
        let kv = Arc::new(MemoryStore::new());
        let mut controller = open(&kv);
        assert!(matches!(
            controller.delete("missing").await,
            Err(QuillError::EntryNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_reset_from_locked() {
        let kv = Arc::new(MemoryStore::new());
        let mut controller = open(&kv);
        controller.save(PlainEntry::new("A", "B")).await.unwrap();
        controller.enable_encryption("hunter2").await.unwrap();
        controller.lock().unwrap();

        controller.reset().unwrap();

        assert_eq!(controller.state(), LockState::NoEncryption);
        assert!(controller.entries().unwrap().is_empty());
        assert!(kv.is_empty());
        assert_eq!(open(&kv).state(), LockState::NoEncryption);
    }

    #[tokio::test]
    async fn test_change_password_and_disable() {
        let kv = Arc::new(MemoryStore::new());
        let mut controller = open(&kv);
        controller.save(PlainEntry::new("A", "B")).await.unwrap();
        controller.enable_encryption("hunter2").await.unwrap();
        controller.change_password("correct horse").await.unwrap();

        let mut reopened = open(&kv);
        assert!(reopened.unlock("hunter2").await.is_err());
        reopened.unlock("correct horse").await.unwrap();

        reopened.disable_encryption().unwrap();
        assert_eq!(reopened.state(), LockState::NoEncryption);

        let plain = open(&kv);
        assert_eq!(plain.state(), LockState::NoEncryption);
        assert_eq!(plain.entries().unwrap()[0].body, "B");
    }

    #[tokio::test]
    async fn test_filtered_and_get() {
        let kv = Arc::new(MemoryStore::new());
        let mut controller = open(&kv);
        controller
            .save(PlainEntry::new("Morning", "coffee").with_id("1").with_moods([Mood::Happy]))
            .await
            .unwrap();
        controller
            .save(PlainEntry::new("Night", "tea").with_id("2").with_moods([Mood::Tired]))
            .await
            .unwrap();

        let hits = controller
            .filtered(&EntryFilter::new().mood(Mood::Tired))
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
        assert_eq!(controller.get("1").unwrap().body, "coffee");
        assert!(matches!(controller.get("3"), Err(QuillError::EntryNotFound(_))));
    }
}
