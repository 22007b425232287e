//! Password entry for locked journals.

use quill_core::QuillError;

use crate::constants::{FORGOTTEN_PASSWORD_HINT, MAX_PASSWORD_ATTEMPTS};
use crate::errors::CliError;
use crate::helpers::{env_password, prompt_password};
use crate::ui::progress::Spinner;
use crate::ui::UiContext;

use super::context::Journal;

/// Unlock with `QUILL_PASSWORD` (one attempt) or up to three prompts.
pub async fn unlock_with_retry(
    journal: &mut Journal,
    interactive: bool,
    ui: &UiContext,
) -> anyhow::Result<()> {
    if let Some(password) = env_password() {
        return match try_unlock(journal, &password, ui).await {
            Ok(()) => Ok(()),
            Err(QuillError::IncorrectPassword) => Err(CliError::auth_failed("Incorrect password.")
                .with_hint(FORGOTTEN_PASSWORD_HINT)
                .into()),
            Err(err) => Err(err.into()),
        };
    }

    let max_attempts = if interactive { MAX_PASSWORD_ATTEMPTS } else { 1 };
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let password = prompt_password(interactive)?;
        match try_unlock(journal, &password, ui).await {
            Ok(()) => return Ok(()),
            Err(QuillError::IncorrectPassword) => {
                let remaining = max_attempts.saturating_sub(attempts);
                if remaining == 0 {
                    let message = if max_attempts == 1 {
                        "Incorrect password."
                    } else {
                        "Too many failed password attempts."
                    };
                    return Err(CliError::auth_failed(message)
                        .with_hint(FORGOTTEN_PASSWORD_HINT)
                        .into());
                }
                eprintln!(
                    "Incorrect password. {} attempt{} remaining.",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
}

async fn try_unlock(
    journal: &mut Journal,
    password: &str,
    ui: &UiContext,
) -> quill_core::Result<()> {
    let spinner = Spinner::start(ui, "Unlocking journal");
    let result = journal.unlock(password).await;
    spinner.finish();
    if result.is_err() {
        tracing::debug!("unlock attempt rejected");
    }
    result
}
