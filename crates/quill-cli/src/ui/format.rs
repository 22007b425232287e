//! String formatting utilities for UI rendering.

use std::collections::BTreeSet;

use chrono::{DateTime, Local, Utc};
use quill_core::Mood;

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// First line of a body, for previews.
pub fn first_line(s: &str) -> &str {
    s.lines().find(|line| !line.trim().is_empty()).unwrap_or("").trim()
}

/// Leading `len` characters of an entry id.
pub fn short_id(id: &str, len: usize) -> &str {
    id.char_indices().nth(len).map_or(id, |(end, _)| &id[..end])
}

/// Shortest prefix length, at least `min`, that still tells every id apart.
///
/// UUIDv7 ids share their leading timestamp digits, so entries written
/// close together need longer prefixes.
pub fn unique_prefix_len<'a>(ids: impl IntoIterator<Item = &'a str>, min: usize) -> usize {
    let mut sorted: Vec<&str> = ids.into_iter().collect();
    sorted.sort_unstable();
    sorted.windows(2).fold(min, |len, pair| {
        let shared = pair[0]
            .chars()
            .zip(pair[1].chars())
            .take_while(|(a, b)| a == b)
            .count();
        len.max(shared + 1)
    })
}

/// Format a timestamp for display.
///
/// Pretty output uses local time; plain output stays RFC 3339 UTC.
pub fn format_datetime(dt: &DateTime<Utc>, pretty: bool) -> String {
    if pretty {
        dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
    } else {
        dt.to_rfc3339()
    }
}

/// Comma-separated mood names, or "-" when there are none.
pub fn mood_list(moods: &BTreeSet<Mood>) -> String {
    if moods.is_empty() {
        return "-".to_string();
    }
    moods.iter().map(Mood::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title here", 10), "a longe...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_first_line_skips_blank_lines() {
        assert_eq!(first_line("\n\n  hello\nworld"), "hello");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0192f3a4-7b1c-7000-8000-000000000000", 8), "0192f3a4");
        assert_eq!(short_id("abc", 8), "abc");
    }

    #[test]
    fn test_unique_prefix_len() {
        let ids = [
            "0192f3a4-7b1c-7000-8000-000000000000",
            "0192f3a4-7b1d-7000-8000-000000000000",
            "0192f3a5-0000-7000-8000-000000000000",
        ];
        assert_eq!(unique_prefix_len(ids, 8), 13);
        assert_eq!(unique_prefix_len(["abc"], 8), 8);
        assert_eq!(unique_prefix_len(std::iter::empty(), 8), 8);
    }

    #[test]
    fn test_mood_list() {
        assert_eq!(mood_list(&BTreeSet::new()), "-");
        let moods = BTreeSet::from([Mood::Tired, Mood::Calm]);
        assert_eq!(mood_list(&moods), "Calm, Tired");
    }

    #[test]
    fn test_plain_datetime_is_rfc3339() {
        let dt = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(format_datetime(&dt, false), "2023-11-14T22:13:20.123+00:00");
    }
}
