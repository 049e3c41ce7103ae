//! Keyword heuristics for "nothing more" and "I agree".
//!
//! Plain substring containment on the trimmed, lower-cased answer against
//! the script's phrase lists. No tokenisation: "assim" contains "sim", and
//! "não concordo" contains "concordo".

/// Trim and lower-case an answer for matching.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// True if any phrase occurs anywhere in the normalised answer.
pub fn contains_phrase(text: &str, phrases: &[String]) -> bool {
    let normalized = normalize(text);
    phrases.iter().any(|p| normalized.contains(p.as_str()))
}

/// True if the answer closes a repeatable list: it is blank or contains a
/// negation phrase.
pub fn closes_list(text: &str, negations: &[String]) -> bool {
    text.trim().is_empty() || contains_phrase(text, negations)
}

/// True if the answer accepts the consensus report.
pub fn is_agreement(text: &str, agreements: &[String]) -> bool {
    contains_phrase(text, agreements)
}
