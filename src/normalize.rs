//! Text canonicalization shared by the similarity scorer and the word aligner
//!
//! Lowercases, turns punctuation into spaces and collapses whitespace so that
//! "Hello, world!" and "hello world" compare equal.

/// Characters replaced by a space before comparison
pub const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '(', ')', '"', '\'', '\u{2019}', '\u{201C}', '\u{201D}', '-',
];

fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Normalize text into its comparable form
pub fn normalize(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_punctuation(c) { ' ' } else { c })
        .collect();

    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize optional text, treating `None` as empty
pub fn normalize_opt(text: Option<&str>) -> String {
    normalize(text.unwrap_or(""))
}

/// Normalize and split into non-empty tokens
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(String::from)
        .collect()
}
