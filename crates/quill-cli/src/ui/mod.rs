//! UI primitives for the Quill CLI.
//!
//! - **Context**: environment detection (TTY, color, unicode) and output mode
//! - **Render**: badges, key-value lines, hints, entry tables
//! - **Progress**: spinner for key derivation
//! - **Format**: string utilities (truncate, short ids, timestamps)

mod context;
pub mod format;
pub mod progress;
pub mod render;

pub use context::{OutputMode, UiContext};
pub use render::{badge, hint, kv, print_error, receipt, simple_table, Badge, Column};
