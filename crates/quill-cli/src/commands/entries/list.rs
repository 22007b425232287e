use quill_core::EntryFilter;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::constants::{DEFAULT_LIST_LIMIT, SHORT_ID_MIN};
use crate::output::print_entry_list;
use crate::ui::format::unique_prefix_len;

pub async fn handle_list(ctx: &AppContext<'_>, args: &ListArgs) -> anyhow::Result<()> {
    let journal = ctx.open_unlocked().await?;

    let mut filter = EntryFilter::new().limit(args.limit.unwrap_or(DEFAULT_LIST_LIMIT));
    if let Some(query) = args.query.as_deref().filter(|q| !q.trim().is_empty()) {
        filter = filter.query(query);
    }
    if let Some(mood) = args.mood {
        filter = filter.mood(mood);
    }

    let entries = journal.filtered(&filter)?;
    // Prefixes must stay unique across the whole journal, not just this page.
    let id_len = unique_prefix_len(
        journal.entries()?.iter().map(|entry| entry.id.as_str()),
        SHORT_ID_MIN,
    );
    print_entry_list(ctx.ui(), &entries, id_len, ctx.quiet())
}
