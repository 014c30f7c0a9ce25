//! Mapping raw candidates onto the canonical result record

use crate::types::{NormalizedResult, RawCandidate, Source, UNTITLED};

/// Normalize a candidate extracted from `source`.
pub fn normalize(candidate: &RawCandidate, source: Source) -> NormalizedResult {
    let title = match candidate.title.as_deref() {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => UNTITLED.to_string(),
    };

    let base = if candidate.is_text_fallback() {
        candidate.content.as_deref()
    } else {
        candidate.summary.as_deref()
    };

    NormalizedResult {
        title,
        url: candidate.url.clone().unwrap_or_default(),
        summary: enrich_summary(
            base.unwrap_or_default(),
            candidate.author.as_deref(),
            candidate.stats.as_deref(),
        ),
        source: source_label(source, candidate.origin.as_deref()),
    }
}

/// Prefix the author and suffix the stats, newline-joined
fn enrich_summary(base: &str, author: Option<&str>, stats: Option<&str>) -> String {
    let mut summary = base.to_string();
    if let Some(author) = author.filter(|a| !a.is_empty()) {
        summary = if summary.is_empty() {
            format!("Author: {}", author)
        } else {
            format!("Author: {}\n{}", author, summary)
        };
    }
    if let Some(stats) = stats.filter(|s| !s.is_empty()) {
        summary = if summary.is_empty() {
            format!("Stats: {}", stats)
        } else {
            format!("{}\nStats: {}", summary, stats)
        };
    }
    summary
}

/// Canonical label, qualified by the page's own origin hint when it adds information
pub fn source_label(source: Source, origin: Option<&str>) -> String {
    let label = source.label();
    match origin.map(str::trim) {
        Some(origin) if !origin.is_empty() && origin != label => format!("{} - {}", label, origin),
        _ => label.to_string(),
    }
}
