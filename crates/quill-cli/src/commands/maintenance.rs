//! Journal-wide commands: status and reset.

use quill_core::LockState;

use crate::app::AppContext;
use crate::cli::ConfirmArgs;
use crate::helpers::confirm;
use crate::ui::{kv, receipt};

/// Report mode and size without asking for a password.
pub fn handle_status(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let path = ctx.store_path()?;
    let journal = ctx.open_journal()?;
    let namespace = journal.store().namespace().to_string();
    let encryption = match journal.state() {
        LockState::NoEncryption => "off",
        _ => "on",
    };
    let count = journal.entry_count().to_string();
    let store = path.display().to_string();
    // Titles are stored in the clear, so they can be listed while locked.
    let titles: Vec<&str> = journal.locked_titles().collect();

    let ui = ctx.ui();
    if ui.mode.is_json() {
        let value = serde_json::json!({
            "store": store,
            "namespace": namespace,
            "encrypted": journal.is_encryption_enabled(),
            "entries": journal.entry_count(),
            "titles": titles,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", kv(ui, "Store", &store));
    println!("{}", kv(ui, "Journal", &namespace));
    println!("{}", kv(ui, "Encryption", encryption));
    println!("{}", kv(ui, "Entries", &count));
    for title in titles {
        println!("{}", kv(ui, "Title", title));
    }
    Ok(())
}

/// Irrecoverably erase the journal of the current profile.
pub fn handle_reset(ctx: &AppContext<'_>, args: &ConfirmArgs) -> anyhow::Result<()> {
    let mut journal = ctx.open_journal()?;
    let prompt = format!(
        "Erase all {} entries? Encrypted entries cannot be recovered afterwards.",
        journal.entry_count()
    );
    if !confirm(&prompt, args.yes, ctx.interactive())? {
        if !ctx.quiet() {
            println!("Cancelled.");
        }
        return Ok(());
    }

    journal.reset()?;
    tracing::info!(namespace = %journal.store().namespace(), "journal erased");
    if !ctx.quiet() {
        println!("{}", receipt(ctx.ui(), "Journal erased", &[]));
    }
    Ok(())
}
