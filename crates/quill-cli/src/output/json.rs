//! JSON output formatting for entries.

use quill_core::PlainEntry;

/// Convert an entry to JSON for output.
pub fn entry_json(entry: &PlainEntry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "title": entry.title,
        "body": entry.body,
        "moods": entry.mood_tags.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
        "created_at": entry.created_at,
    })
}

/// Convert multiple entries to JSON array for output.
pub fn entries_json<'a>(entries: impl IntoIterator<Item = &'a PlainEntry>) -> serde_json::Value {
    serde_json::Value::Array(entries.into_iter().map(entry_json).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::Mood;

    #[test]
    fn test_entry_json_fields() {
        let created = chrono::DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let entry = PlainEntry::new("Morning", "Coffee")
            .with_id("abc")
            .with_moods([Mood::Happy, Mood::Calm])
            .with_created_at(created);

        let value = entry_json(&entry);
        assert_eq!(value["id"], "abc");
        assert_eq!(value["body"], "Coffee");
        assert_eq!(value["moods"], serde_json::json!(["Calm", "Happy"]));
        assert_eq!(value["created_at"], "2023-11-14T22:13:20Z");
    }
}
