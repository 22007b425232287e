use std::collections::BTreeSet;

use quill_core::PlainEntry;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::helpers::{read_entry_body, resolve_entry_id};
use crate::ui::receipt;

use super::notice_crisis_language;

pub async fn handle_edit(ctx: &AppContext<'_>, args: &EditArgs) -> anyhow::Result<()> {
    let mut journal = ctx.open_unlocked().await?;
    let id = resolve_entry_id(journal.entries()?, &args.id)?;
    let existing = journal.get(&id)?.clone();

    let title = match args.title.as_deref().map(str::trim) {
        Some("") => return Err(CliError::invalid_input("Title cannot be empty").into()),
        Some(title) => title.to_string(),
        None => existing.title.clone(),
    };

    let metadata_only = args.title.is_some() || !args.mood.is_empty() || args.clear_moods;
    let body = if args.body.is_some() || !metadata_only {
        read_entry_body(
            ctx.cli().no_input,
            args.body.clone(),
            ctx.editor()?,
            Some(&existing.body),
        )?
    } else {
        existing.body.clone()
    };

    let mood_tags: BTreeSet<_> = if args.clear_moods {
        BTreeSet::new()
    } else if !args.mood.is_empty() {
        args.mood.iter().copied().collect()
    } else {
        existing.mood_tags.clone()
    };

    let updated = PlainEntry {
        id: existing.id.clone(),
        title,
        body,
        mood_tags,
        created_at: existing.created_at,
    };
    if updated == existing {
        if !ctx.quiet() {
            println!("No changes.");
        }
        return Ok(());
    }
    notice_crisis_language(ctx, &updated);
    journal.save(updated).await?;

    if !ctx.quiet() {
        println!("{}", receipt(ctx.ui(), "Entry updated", &[("ID", id.as_str())]));
    }
    Ok(())
}
