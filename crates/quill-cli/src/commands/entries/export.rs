use crate::app::AppContext;
use crate::cli::ExportArgs;
use crate::helpers::write_private;
use crate::output::entries_json;
use crate::ui::{badge, Badge};

/// Write every entry, decrypted, as a JSON array.
pub async fn handle_export(ctx: &AppContext<'_>, args: &ExportArgs) -> anyhow::Result<()> {
    let journal = ctx.open_unlocked().await?;
    let entries = journal.entries()?;
    let json = serde_json::to_string_pretty(&entries_json(entries))?;

    match &args.output {
        Some(path) => {
            write_private(path, json.as_bytes())?;
            if !ctx.quiet() {
                eprintln!(
                    "{}",
                    badge(
                        ctx.ui(),
                        Badge::Warn,
                        &format!(
                            "Exported {} entries to {} in plain text.",
                            entries.len(),
                            path.display()
                        )
                    )
                );
            }
        }
        None => println!("{}", json),
    }
    Ok(())
}
