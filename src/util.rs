//! Shared utility functions

const ELLIPSIS: &str = "...";

/// Truncate a string to at most `max_chars` characters, the "..." marker included.
/// Counts Unicode scalar values so CJK text is cut on character boundaries.
/// Limits too small to hold the marker cut without one.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.char_indices().nth(max_chars).is_none() {
        return s.to_string();
    }
    let (keep, marker) = match max_chars.checked_sub(ELLIPSIS.len()) {
        Some(keep) => (keep, ELLIPSIS),
        None => (max_chars, ""),
    };
    let end = s.char_indices().nth(keep).map_or(s.len(), |(i, _)| i);
    format!("{}{}", &s[..end], marker)
}

/// Collapse all runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of characters (not bytes) in a string.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Fast non-cryptographic hash for dedup keys
pub fn fast_hash(s: &str) -> u64 {
    xxhash_rust::xxh3::xxh3_64(s.as_bytes())
}
