use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::helpers::resolve_entry_id;
use crate::output::print_entry;

pub async fn handle_show(ctx: &AppContext<'_>, args: &ShowArgs) -> anyhow::Result<()> {
    let journal = ctx.open_unlocked().await?;
    let id = resolve_entry_id(journal.entries()?, &args.id)?;
    print_entry(ctx.ui(), journal.get(&id)?, ctx.quiet())
}
