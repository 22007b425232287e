use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::helpers::{confirm, resolve_entry_id};
use crate::ui::format::truncate;
use crate::ui::receipt;

pub async fn handle_delete(ctx: &AppContext<'_>, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut journal = ctx.open_unlocked().await?;
    let id = resolve_entry_id(journal.entries()?, &args.id)?;
    let title = truncate(&journal.get(&id)?.title, 40);

    let prompt = format!("Delete \"{}\"? This cannot be undone.", title);
    if !confirm(&prompt, args.yes, ctx.interactive())? {
        if !ctx.quiet() {
            println!("Cancelled.");
        }
        return Ok(());
    }

    journal.delete(&id).await?;
    if !ctx.quiet() {
        println!("{}", receipt(ctx.ui(), "Entry deleted", &[("ID", id.as_str())]));
    }
    Ok(())
}
