//! Text and table output formatting for entries.

use quill_core::PlainEntry;

use crate::constants::SUPPORT_NOTICE;
use crate::ui::format::{first_line, format_datetime, mood_list, short_id, truncate};
use crate::ui::{badge, hint, kv, simple_table, Badge, Column, UiContext};

use super::json::{entries_json, entry_json};

const TITLE_WIDTH: usize = 32;
const PREVIEW_WIDTH: usize = 48;

/// Print a single entry.
pub fn print_entry(ctx: &UiContext, entry: &PlainEntry, quiet: bool) -> anyhow::Result<()> {
    if ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entry_json(entry))?);
        return Ok(());
    }

    if !quiet {
        println!("{}", kv(ctx, "ID", &entry.id));
        println!("{}", kv(ctx, "Title", &entry.title));
        println!(
            "{}",
            kv(ctx, "Created", &format_datetime(&entry.created_at, ctx.mode.is_pretty()))
        );
        println!("{}", kv(ctx, "Moods", &mood_list(&entry.mood_tags)));
        println!();
    }
    println!("{}", entry.body);
    Ok(())
}

/// Print entries as a table, plain rows or JSON.
///
/// Pretty tables abbreviate ids to `id_len` characters.
pub fn print_entry_list(
    ctx: &UiContext,
    entries: &[&PlainEntry],
    id_len: usize,
    quiet: bool,
) -> anyhow::Result<()> {
    if ctx.mode.is_json() {
        let value = entries_json(entries.iter().copied());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if entries.is_empty() {
        if !quiet {
            println!("No entries found.");
        }
        return Ok(());
    }

    let pretty = ctx.mode.is_pretty();
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            vec![
                if pretty {
                    short_id(&entry.id, id_len).to_string()
                } else {
                    entry.id.clone()
                },
                format_datetime(&entry.created_at, pretty),
                truncate(&entry.title, TITLE_WIDTH),
                mood_list(&entry.mood_tags),
                truncate(first_line(&entry.body), PREVIEW_WIDTH),
            ]
        })
        .collect();
    let columns = [
        Column::new("ID"),
        Column::new("CREATED"),
        Column::new("TITLE"),
        Column::new("MOODS"),
        Column::new("PREVIEW"),
    ];
    println!("{}", simple_table(ctx, &columns, &rows));
    if pretty && !quiet {
        println!();
        println!("{}", hint(ctx, "quill show <id>"));
    }
    Ok(())
}

/// Print the support notice on stderr.
pub fn print_support_notice(ctx: &UiContext) {
    eprintln!("{}", badge(ctx, Badge::Info, SUPPORT_NOTICE));
}
