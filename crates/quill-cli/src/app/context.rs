//! Application context for the Quill CLI.
//!
//! Combines CLI arguments with the lazily-loaded config file and resolves
//! which store and namespace a command operates on.

use std::io::IsTerminal;
use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use quill_core::{CollectionStore, LockController, LockState, Namespace, SqliteStore};

use crate::cli::Cli;
use crate::config::{default_store_path, read_config, resolve_config_path, QuillConfig};
use crate::ui::UiContext;

use super::unlock::unlock_with_retry;

/// A journal session over the durable store.
pub type Journal = LockController<SqliteStore>;

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    ui: UiContext,
    config: OnceCell<QuillConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli, json: bool) -> Self {
        Self {
            cli,
            ui: UiContext::from_env(json, cli.no_color),
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Whether prompts may be shown.
    pub fn interactive(&self) -> bool {
        !self.cli.no_input && std::io::stdin().is_terminal()
    }

    /// The config file, or defaults when none exists yet.
    pub fn config(&self) -> anyhow::Result<&QuillConfig> {
        self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if path.exists() {
                tracing::debug!(path = %path.display(), "reading config");
                read_config(&path)
            } else {
                Ok(QuillConfig::default())
            }
        })
    }

    /// `--store` / `QUILL_STORE`, then the config file, then the XDG default.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.cli.store.clone() {
            return Ok(path);
        }
        if let Some(path) = self.config()?.store.path.as_deref() {
            return Ok(PathBuf::from(path));
        }
        default_store_path()
    }

    /// `--user` / `QUILL_USER`, then the config profile; `None` is the guest.
    pub fn user(&self) -> anyhow::Result<Option<String>> {
        if let Some(user) = self.cli.user.clone() {
            return Ok(Some(user));
        }
        Ok(self.config()?.profile.user.clone())
    }

    pub fn namespace(&self) -> anyhow::Result<Namespace> {
        Ok(Namespace::for_user(self.user()?.as_deref()))
    }

    /// Get the configured editor override, if any.
    pub fn editor(&self) -> anyhow::Result<Option<&str>> {
        Ok(self.config()?.ui.editor.as_deref())
    }

    /// Open the journal without unlocking it.
    pub fn open_journal(&self) -> anyhow::Result<Journal> {
        let path = self.store_path()?;
        let store = SqliteStore::open(&path).map_err(|e| {
            anyhow::anyhow!("Failed to open journal store {}: {}", path.display(), e)
        })?;
        let journal = LockController::open(CollectionStore::new(store, self.namespace()?))?;
        tracing::debug!(state = journal.state().as_str(), "journal opened");
        Ok(journal)
    }

    /// Open the journal and unlock it if it is encrypted.
    pub async fn open_unlocked(&self) -> anyhow::Result<Journal> {
        let mut journal = self.open_journal()?;
        if journal.state() == LockState::Locked {
            unlock_with_retry(&mut journal, self.interactive(), &self.ui).await?;
        }
        Ok(journal)
    }
}
