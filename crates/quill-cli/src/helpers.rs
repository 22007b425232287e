//! Input helper functions for the CLI.

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use dialoguer::{Confirm, Password};
use quill_core::crypto::MIN_PASSWORD_LENGTH;
use quill_core::PlainEntry;
use zeroize::Zeroizing;

use crate::constants::env;
use crate::errors::CliError;

/// `QUILL_PASSWORD`, if set and non-blank.
pub fn env_password() -> Option<Zeroizing<String>> {
    read_env_secret(env::PASSWORD)
}

fn read_env_secret(var: &str) -> Option<Zeroizing<String>> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(Zeroizing::new)
}

/// Prompt for the journal password, or read it from `QUILL_PASSWORD`.
pub fn prompt_password(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(password) = env_password() {
        return Ok(password);
    }
    if !interactive {
        return Err(CliError::auth_failed(
            "No password provided and no TTY available. Set QUILL_PASSWORD.",
        )
        .into());
    }
    Password::new()
        .with_prompt("Password")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Prompt for a new password with confirmation, or read it from `env_var`.
pub fn prompt_new_password(env_var: &str, interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(password) = read_env_secret(env_var) {
        return Ok(password);
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No password provided and no TTY available. Set {}.",
            env_var
        ))
        .into());
    }
    Password::new()
        .with_prompt(format!("New password (at least {} characters)", MIN_PASSWORD_LENGTH))
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Ask before a destructive action. `--yes` skips the question; without a
/// terminal the action is refused unless `--yes` was given.
pub fn confirm(prompt: &str, assume_yes: bool, interactive: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "{} Re-run with --yes to confirm.",
            prompt
        ))
        .into());
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

/// Read entry body from --body flag, stdin, or $EDITOR.
///
/// `initial` pre-fills the editor when changing an existing entry.
pub fn read_entry_body(
    no_input: bool,
    body: Option<String>,
    editor_override: Option<&str>,
    initial: Option<&str>,
) -> anyhow::Result<String> {
    if let Some(value) = body {
        if value.trim().is_empty() {
            return Err(CliError::invalid_input("--body cannot be empty").into());
        }
        return Ok(value);
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = buffer.trim_end().to_string();
        if trimmed.is_empty() {
            return Err(CliError::invalid_input("No input provided on stdin").into());
        }
        return Ok(trimmed);
    }

    if no_input {
        return Err(CliError::invalid_input("--no-input requires --body or content on stdin").into());
    }

    read_body_from_editor(editor_override, initial.unwrap_or(""))
}

/// Open $EDITOR to compose entry body.
fn read_body_from_editor(editor_override: Option<&str>, initial: &str) -> anyhow::Result<String> {
    let editor = editor_override
        .map(|value| value.to_string())
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            CliError::invalid_input("$EDITOR is not set; use --body or pipe content via stdin")
        })?;

    let path = scratch_path()?;
    write_private(&path, initial.as_bytes())?;
    let scratch = ScratchFile(path);

    let status = Command::new(&editor)
        .arg(&scratch.0)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to launch editor {}: {}", editor, e))?;
    if !status.success() {
        return Err(anyhow::anyhow!("Editor exited with failure"));
    }

    let contents = Zeroizing::new(
        std::fs::read_to_string(&scratch.0)
            .map_err(|e| anyhow::anyhow!("Failed to read temp file: {}", e))?,
    );
    let trimmed = contents.trim_end().to_string();
    if trimmed.is_empty() {
        return Err(CliError::invalid_input("Entry body is empty").into());
    }
    Ok(trimmed)
}

/// Editor scratch file, overwritten and removed on drop.
struct ScratchFile(PathBuf);

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Ok(meta) = std::fs::metadata(&self.0) {
            let _ = std::fs::write(&self.0, vec![0u8; meta.len() as usize]);
        }
        let _ = std::fs::remove_file(&self.0);
    }
}

fn scratch_path() -> anyhow::Result<PathBuf> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow::anyhow!("System time error: {}", e))?
        .as_nanos();
    let filename = format!("quill_entry_{}_{}.md", std::process::id(), nanos);
    Ok(std::env::temp_dir().join(filename))
}

/// Write a file readable only by the current user.
pub fn write_private(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", path.display(), e))?;
        file.write_all(contents)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
    }
    #[cfg(not(unix))]
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
    Ok(())
}

/// Resolve a full id or a unique id prefix.
pub fn resolve_entry_id(entries: &[PlainEntry], wanted: &str) -> anyhow::Result<String> {
    let wanted = wanted.trim();
    if wanted.is_empty() {
        return Err(CliError::invalid_input("Entry ID cannot be empty").into());
    }
    if let Some(entry) = entries.iter().find(|entry| entry.id == wanted) {
        return Ok(entry.id.clone());
    }

    let mut matches = entries.iter().filter(|entry| entry.id.starts_with(wanted));
    match (matches.next(), matches.next()) {
        (Some(entry), None) => Ok(entry.id.clone()),
        (Some(_), Some(_)) => Err(CliError::invalid_input(format!(
            "Entry ID prefix \"{}\" is ambiguous",
            wanted
        ))
        .with_hint("Use more characters of the ID.")
        .into()),
        (None, _) => Err(CliError::not_found(format!("Entry not found: {}", wanted)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<PlainEntry> {
        vec![
            PlainEntry::new("a", "1").with_id("0192aaaa-0001"),
            PlainEntry::new("b", "2").with_id("0192aaaa-0002"),
            PlainEntry::new("c", "3").with_id("0193bbbb-0003"),
        ]
    }

    #[test]
    fn test_resolve_full_and_prefix() {
        let entries = entries();
        assert_eq!(resolve_entry_id(&entries, "0192aaaa-0002").unwrap(), "0192aaaa-0002");
        assert_eq!(resolve_entry_id(&entries, "0193").unwrap(), "0193bbbb-0003");
    }

    #[test]
    fn test_resolve_ambiguous_and_missing() {
        let entries = entries();
        let err = resolve_entry_id(&entries, "0192").unwrap_err();
        assert!(err.to_string().contains("ambiguous"));

        let err = resolve_entry_id(&entries, "ffff").unwrap_err();
        let cli_err = err.downcast_ref::<CliError>().unwrap();
        assert_eq!(cli_err.exit_code(), crate::constants::exit_codes::NOT_FOUND);
    }

    #[test]
    fn test_confirm_requires_yes_without_tty() {
        assert!(confirm("Delete?", true, false).unwrap());
        assert!(confirm("Delete?", false, false).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_private_sets_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        write_private(&path, b"[]").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read(&path).unwrap(), b"[]");
    }
}
