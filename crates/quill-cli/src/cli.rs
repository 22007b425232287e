use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use quill_core::{Mood, VERSION};

/// Quill - a private mood journal with optional password encryption
#[derive(Parser)]
#[command(name = "quill")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the journal store
    #[arg(short, long, global = true, env = "QUILL_STORE")]
    pub store: Option<PathBuf>,

    /// Journal owner; defaults to the guest journal
    #[arg(short, long, global = true, env = "QUILL_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Never prompt; fail instead
    #[arg(long, global = true)]
    pub no_input: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file pointing at a journal store
    Init(InitArgs),

    /// Write a new entry
    Add(AddArgs),

    /// Change an existing entry
    Edit(EditArgs),

    /// List entries, newest first
    List(ListArgs),

    /// Show a single entry
    Show(ShowArgs),

    /// Delete an entry
    Delete(DeleteArgs),

    /// Export all entries as JSON
    Export(ExportArgs),

    /// Show whether the journal is encrypted and how many entries it holds
    Status(StatusArgs),

    /// Protect the journal with a password
    Encrypt,

    /// Remove password protection
    Decrypt(ConfirmArgs),

    /// Change the journal password
    Passwd,

    /// Erase the journal (the only way out of a forgotten password)
    Reset(ConfirmArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Where the journal store will live
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Editor used for composing entries
    #[arg(long)]
    pub editor: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Entry title (stored unencrypted)
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Entry body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Tag the entry with a mood (repeatable)
    #[arg(short, long, value_name = "MOOD")]
    pub mood: Vec<Mood>,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Replace the mood tags (repeatable)
    #[arg(short, long, value_name = "MOOD")]
    pub mood: Vec<Mood>,

    /// Remove all mood tags
    #[arg(long, conflicts_with = "mood")]
    pub clear_moods: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only entries whose title or body contains this text
    #[arg(long)]
    pub query: Option<String>,

    /// Only entries tagged with this mood
    #[arg(long, value_name = "MOOD")]
    pub mood: Option<Mood>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `status` command
#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Entry ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Confirmation flag for destructive commands
#[derive(Args)]
pub struct ConfirmArgs {
    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}
