//! Keyword relevance filtering

use crate::types::RawCandidate;

/// Whether a candidate is highly relevant to `keyword`.
///
/// Case-insensitive: the keyword must occur in the title or summary, either
/// as a substring or padded by single spaces on both sides. Text-fallback
/// candidates have no fields to test and always pass.
pub fn is_relevant(candidate: &RawCandidate, keyword: &str) -> bool {
    if candidate.is_text_fallback() {
        return true;
    }

    let keyword = keyword.to_lowercase();
    let padded = format!(" {} ", keyword);
    let title = candidate.title.as_deref().unwrap_or_default().to_lowercase();
    let summary = candidate.summary.as_deref().unwrap_or_default().to_lowercase();

    title.contains(&keyword)
        || summary.contains(&keyword)
        || title.contains(&padded)
        || summary.contains(&padded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_match_is_case_insensitive() {
        let candidate = RawCandidate::structured("Learning RUST the hard way");
        assert!(is_relevant(&candidate, "rust"));
        assert!(is_relevant(&candidate, "Rust"));
    }

    #[test]
    fn test_summary_match() {
        let candidate = RawCandidate::structured("A systems language")
            .with_summary("Memory safety without garbage collection, that is Rust.");
        assert!(is_relevant(&candidate, "rust"));
    }

    #[test]
    fn test_keyword_at_field_boundary_matches_by_substring() {
        let candidate = RawCandidate::structured("rust");
        assert!(is_relevant(&candidate, "rust"));
    }

    #[test]
    fn test_unrelated_candidate_rejected() {
        let candidate = RawCandidate::structured("Go concurrency patterns").with_summary("Goroutines");
        assert!(!is_relevant(&candidate, "rust"));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut candidate = RawCandidate::structured("x");
        candidate.title = None;
        assert!(!is_relevant(&candidate, "rust"));
    }

    #[test]
    fn test_text_fallback_always_relevant() {
        let candidate = RawCandidate::text_fallback("completely unrelated text");
        assert!(is_relevant(&candidate, "rust"));
        assert!(is_relevant(&candidate, "编程"));
    }

    #[test]
    fn test_cjk_keyword() {
        let candidate = RawCandidate::structured("Rust 程序设计语言");
        assert!(is_relevant(&candidate, "程序设计"));
    }
}
