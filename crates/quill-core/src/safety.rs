//! Crisis-language detection for entry text.
//!
//! A plain case-insensitive substring check. It is a prompt to show support
//! resources, not a classifier, and false positives ("death of a salesman")
//! are accepted.

/// Phrases that trigger the support prompt.
pub const CRISIS_KEYWORDS: [&str; 8] = [
    "suicide",
    "kill myself",
    "hurt myself",
    "end it all",
    "die",
    "death",
    "overdose",
    "cut myself",
];

/// Whether the title or body mentions any crisis keyword.
pub fn contains_crisis_language(title: &str, body: &str) -> bool {
    let text = format!("{} {}", title, body).to_lowercase();
    CRISIS_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}
