//! Password protection commands: encrypt, decrypt, passwd.

use quill_core::LockState;

use crate::app::AppContext;
use crate::cli::ConfirmArgs;
use crate::constants::{env, FORGOTTEN_PASSWORD_HINT};
use crate::errors::CliError;
use crate::helpers::{confirm, prompt_new_password};
use crate::ui::progress::Spinner;
use crate::ui::{badge, receipt, Badge};

pub async fn handle_encrypt(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let mut journal = ctx.open_journal()?;
    if journal.state() != LockState::NoEncryption {
        return Err(CliError::invalid_input("Journal is already encrypted.")
            .with_hint("Use `quill passwd` to change the password.")
            .into());
    }

    let password = prompt_new_password(env::PASSWORD, ctx.interactive())?;
    let spinner = Spinner::start(ctx.ui(), "Encrypting entries");
    let result = journal.enable_encryption(&password).await;
    spinner.finish();
    result?;

    if !ctx.quiet() {
        let count = journal.entry_count().to_string();
        println!(
            "{}",
            receipt(ctx.ui(), "Journal encrypted", &[("Entries", count.as_str())])
        );
        eprintln!(
            "{}",
            badge(ctx.ui(), Badge::Warn, FORGOTTEN_PASSWORD_HINT)
        );
    }
    Ok(())
}

pub async fn handle_decrypt(ctx: &AppContext<'_>, args: &ConfirmArgs) -> anyhow::Result<()> {
    let mut journal = ctx.open_unlocked().await?;
    if journal.state() == LockState::NoEncryption {
        return Err(CliError::invalid_input("Journal is not encrypted.").into());
    }
    if !confirm(
        "Store every entry body in plain text again?",
        args.yes,
        ctx.interactive(),
    )? {
        if !ctx.quiet() {
            println!("Cancelled.");
        }
        return Ok(());
    }

    journal.disable_encryption()?;
    if !ctx.quiet() {
        let count = journal.entry_count().to_string();
        println!(
            "{}",
            receipt(ctx.ui(), "Journal decrypted", &[("Entries", count.as_str())])
        );
    }
    Ok(())
}

/// Re-seal with a new password taken from `QUILL_NEW_PASSWORD` or a prompt.
pub async fn handle_passwd(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let mut journal = ctx.open_unlocked().await?;
    if journal.state() == LockState::NoEncryption {
        return Err(CliError::invalid_input("Journal is not encrypted.")
            .with_hint("Use `quill encrypt` to set a password.")
            .into());
    }

    let password = prompt_new_password(env::NEW_PASSWORD, ctx.interactive())?;
    let spinner = Spinner::start(ctx.ui(), "Re-encrypting entries");
    let result = journal.change_password(&password).await;
    spinner.finish();
    result?;

    if !ctx.quiet() {
        println!("{}", receipt(ctx.ui(), "Password changed", &[]));
    }
    Ok(())
}
