//! Rendering primitives for CLI output.

use comfy_table::presets::NOTHING;
use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};
use owo_colors::OwoColorize;

use super::context::UiContext;

/// Status badge kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    /// Badge text, e.g. `[OK]`.
    pub fn display(&self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Self::Ok, true) => "[\u{2713}]",
            (Self::Ok, false) => "[OK]",
            (Self::Warn, true) => "[\u{26A0}]",
            (Self::Warn, false) => "[WARN]",
            (Self::Err, true) => "[\u{2717}]",
            (Self::Err, false) => "[ERR]",
            (Self::Info, true) => "[\u{2139}]",
            (Self::Info, false) => "[INFO]",
        }
    }

    fn paint(&self, text: &str) -> String {
        match self {
            Self::Ok => text.green().to_string(),
            Self::Warn => text.yellow().to_string(),
            Self::Err => text.red().to_string(),
            Self::Info => text.cyan().to_string(),
        }
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let text = kind.display(ctx.unicode);
    let rendered = if ctx.color {
        kind.paint(text)
    } else {
        text.to_string()
    };
    if message.is_empty() {
        rendered
    } else {
        format!("{} {}", rendered, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = format!("{}:", key);
        if ctx.color {
            format!("{} {}", label.dimmed(), value)
        } else {
            format!("{} {}", label, value)
        }
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = if ctx.color {
            "Hint:".dimmed().to_string()
        } else {
            "Hint:".to_string()
        };
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a summary block after an action.
///
/// Pretty mode: badge plus indented key-value pairs
/// Plain mode: `status=ok` plus key=value lines
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let mut lines = Vec::new();
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push("status=ok".to_string());
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }
    lines.join("\n")
}

/// Column definition for table rendering.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Render a borderless table.
///
/// Pretty mode: dim headers and padded columns
/// Plain mode: tab-separated values, no header
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = ComfyTable::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|c| {
            let cell = Cell::new(c.header);
            if ctx.color {
                cell.add_attribute(Attribute::Dim)
            } else {
                cell
            }
        })
        .collect();
    table.set_header(header_cells);

    for i in 0..columns.len() {
        if let Some(column) = table.column_mut(i) {
            column.set_padding((0, 2));
        }
    }
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Format an error message with optional hint.
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h));
        }
    }
    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;

    fn pretty_ctx() -> UiContext {
        UiContext {
            is_tty: true,
            color: false,
            unicode: true,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_kv_modes() {
        assert_eq!(kv(&UiContext::plain(), "Entry count", "3"), "entry_count=3");
        assert_eq!(kv(&pretty_ctx(), "Entries", "3"), "Entries: 3");
    }

    #[test]
    fn test_badge_ascii_fallback() {
        assert_eq!(badge(&UiContext::plain(), Badge::Ok, "Saved"), "[OK] Saved");
        assert_eq!(badge(&pretty_ctx(), Badge::Err, ""), "[\u{2717}]");
    }

    #[test]
    fn test_receipt_plain() {
        let out = receipt(&UiContext::plain(), "Entry saved", &[("ID", "abc")]);
        assert_eq!(out, "status=ok\nid=abc");
    }

    #[test]
    fn test_plain_table_has_no_header() {
        let rows = vec![vec!["a".to_string(), "b".to_string()]];
        let out = simple_table(&UiContext::plain(), &[Column::new("X"), Column::new("Y")], &rows);
        assert_eq!(out, "a\tb");
    }

    #[test]
    fn test_pretty_table_has_header() {
        let rows = vec![vec!["0192f3a4".to_string(), "Morning".to_string()]];
        let out = simple_table(&pretty_ctx(), &[Column::new("ID"), Column::new("TITLE")], &rows);
        assert!(out.contains("TITLE"));
        assert!(out.contains("Morning"));
    }

    #[test]
    fn test_error_message_plain() {
        let out = error_message(&UiContext::plain(), "Incorrect password.", Some("reset"));
        assert_eq!(out, "error=Incorrect password.\nhint=reset");
    }
}
