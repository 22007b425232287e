//! Entry commands: add, edit, list, show, delete, export.

mod add;
mod delete;
mod edit;
mod export;
mod list;
mod show;

pub use add::handle_add;
pub use delete::handle_delete;
pub use edit::handle_edit;
pub use export::handle_export;
pub use list::handle_list;
pub use show::handle_show;

use quill_core::safety::contains_crisis_language;
use quill_core::PlainEntry;

use crate::app::AppContext;
use crate::output::print_support_notice;

/// Point the writer at support resources when an entry mentions self-harm.
fn notice_crisis_language(ctx: &AppContext, entry: &PlainEntry) {
    if contains_crisis_language(&entry.title, &entry.body) {
        print_support_notice(ctx.ui());
    }
}
