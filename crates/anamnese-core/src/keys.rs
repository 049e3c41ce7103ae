//! Storage key conventions.
//!
//! Pure string functions with no filesystem access. These define the canonical
//! layout of session and record files under a storage root.

use uuid::Uuid;

/// Live session state for one user.
pub fn session(user_id: &str) -> String {
    format!("sessions/{}.json", encode_segment(user_id))
}

/// Directory holding every completed record for a user.
pub fn records_prefix(user_id: &str) -> String {
    format!("records/{}/", encode_segment(user_id))
}

pub fn record(user_id: &str, session_id: Uuid) -> String {
    format!("{}{session_id}.json", records_prefix(user_id))
}

pub fn record_summary(user_id: &str, session_id: Uuid) -> String {
    format!("{}{session_id}.md", records_prefix(user_id))
}

pub fn record_docx(user_id: &str, session_id: Uuid) -> String {
    format!("{}{session_id}.docx", records_prefix(user_id))
}

/// Make an arbitrary user id safe to use as a single path segment.
///
/// ASCII alphanumerics, `-` and `_` pass through; every other byte becomes
/// `%XX`, so distinct ids never collide.
pub fn encode_segment(raw: &str) -> String {
    if raw.is_empty() {
        return "%".to_string();
    }

    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
