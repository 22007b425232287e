//! Quill CLI - a private mood journal with optional password encryption
//!
//! This is the command-line interface for Quill. It provides a user-friendly
//! interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{entries, init, maintenance, misc, security};
use crate::constants::env;
use crate::errors::classify;
use crate::ui::{print_error, UiContext};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        tracing::debug!(error = ?e, "command failed");
        let (message, hint, code) = classify(&e);
        let ui_ctx = UiContext::from_env(false, cli.no_color);
        print_error(&ui_ctx, &message, hint.as_deref());
        std::process::exit(code);
    }
}

/// Log to stderr; `QUILL_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(env::LOG).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let json = match &cli.command {
        Some(Commands::List(args)) => args.json,
        Some(Commands::Show(args)) => args.json,
        Some(Commands::Status(args)) => args.json,
        _ => false,
    };
    let ctx = AppContext::new(cli, json);

    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(&ctx, args)?,
        Some(Commands::Add(args)) => entries::handle_add(&ctx, args).await?,
        Some(Commands::Edit(args)) => entries::handle_edit(&ctx, args).await?,
        Some(Commands::List(args)) => entries::handle_list(&ctx, args).await?,
        Some(Commands::Show(args)) => entries::handle_show(&ctx, args).await?,
        Some(Commands::Delete(args)) => entries::handle_delete(&ctx, args).await?,
        Some(Commands::Export(args)) => entries::handle_export(&ctx, args).await?,
        Some(Commands::Status(_)) => maintenance::handle_status(&ctx)?,
        Some(Commands::Encrypt) => security::handle_encrypt(&ctx).await?,
        Some(Commands::Decrypt(args)) => security::handle_decrypt(&ctx, args).await?,
        Some(Commands::Passwd) => security::handle_passwd(&ctx).await?,
        Some(Commands::Reset(args)) => maintenance::handle_reset(&ctx, args)?,
        Some(Commands::Completions { shell }) => misc::handle_completions(*shell)?,
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }
    Ok(())
}
