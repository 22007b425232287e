//! Output formatting for entries.

mod json;
mod text;

pub use json::entries_json;
pub use text::{print_entry, print_entry_list, print_support_notice};
