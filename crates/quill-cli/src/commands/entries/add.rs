use quill_core::PlainEntry;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::errors::CliError;
use crate::helpers::read_entry_body;
use crate::ui::format::mood_list;
use crate::ui::receipt;

use super::notice_crisis_language;

pub async fn handle_add(ctx: &AppContext<'_>, args: &AddArgs) -> anyhow::Result<()> {
    let title = args.title.trim();
    if title.is_empty() {
        return Err(CliError::invalid_input("Title cannot be empty").into());
    }

    let mut journal = ctx.open_unlocked().await?;
    let body = read_entry_body(
        ctx.cli().no_input,
        args.body.clone(),
        ctx.editor()?,
        None,
    )?;

    let entry = PlainEntry::new(title, body).with_moods(args.mood.iter().copied());
    notice_crisis_language(ctx, &entry);

    let id = entry.id.clone();
    let moods = mood_list(&entry.mood_tags);
    journal.save(entry).await?;

    if ctx.quiet() {
        println!("{}", id);
    } else {
        let encrypted = if journal.is_encryption_enabled() { "yes" } else { "no" };
        println!(
            "{}",
            receipt(
                ctx.ui(),
                "Entry saved",
                &[("ID", id.as_str()), ("Moods", moods.as_str()), ("Encrypted", encrypted)]
            )
        );
    }
    Ok(())
}
