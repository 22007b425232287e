//! `quill init`: write the config file and create the store.

use quill_core::SqliteStore;

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::{default_store_path, resolve_config_path, write_config, QuillConfig};
use crate::errors::CliError;
use crate::ui::{hint, receipt};

pub fn handle_init(ctx: &AppContext<'_>, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}",
            config_path.display()
        ))
        .with_hint("Use --force to overwrite it.")
        .into());
    }

    let store_path = match args.path.clone().or_else(|| ctx.cli().store.clone()) {
        Some(path) => path,
        None => default_store_path()?,
    };
    let editor = args
        .editor
        .clone()
        .filter(|value| !value.trim().is_empty());
    let config = QuillConfig::new(&store_path, ctx.cli().user.clone(), editor);
    write_config(&config_path, &config)?;

    // Creating the store up front surfaces permission problems now.
    SqliteStore::open(&store_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create journal store {}: {}",
            store_path.display(),
            e
        )
    })?;

    if !ctx.quiet() {
        let config_display = config_path.display().to_string();
        let store_display = store_path.display().to_string();
        println!(
            "{}",
            receipt(
                ctx.ui(),
                "Quill initialized",
                &[
                    ("Config", config_display.as_str()),
                    ("Store", store_display.as_str())
                ]
            )
        );
        if ctx.ui().mode.is_pretty() {
            println!("{}", hint(ctx.ui(), "quill add \"First entry\""));
            println!("{}", hint(ctx.ui(), "quill encrypt  (protect entries with a password)"));
        }
    }
    Ok(())
}
