//! Storage-side deduplication across searches
//!
//! Results are keyed by `(title, url, source)` where the source is first
//! canonicalized with [`storage_label`], so the same record seen on two
//! pages or in two runs is stored once.

use std::collections::HashSet;
use url::Url;

use crate::types::{NormalizedResult, Source};
use crate::util::fast_hash;

/// Label stored when nothing identifies a result's origin
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Canonical storage label for a result.
///
/// Labels mentioning a known source collapse to its canonical label. A
/// missing label is inferred from the URL host, falling back to the host
/// itself and then to [`UNKNOWN_SOURCE`].
pub fn storage_label(result: &NormalizedResult) -> String {
    let label = result.source.trim();
    if !label.is_empty() {
        let lower = label.to_lowercase();
        return Source::ALL
            .iter()
            .find(|s| lower.contains(&s.label().to_lowercase()))
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| label.to_string());
    }

    let host = Url::parse(&result.url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_lowercase));
    match host {
        Some(host) => Source::ALL
            .iter()
            .find(|s| host.contains(&s.label().to_lowercase()))
            .map(|s| s.label().to_string())
            .unwrap_or(host),
        None => UNKNOWN_SOURCE.to_string(),
    }
}

/// Remembers stored results and filters ones already seen
#[derive(Debug, Default)]
pub struct HistoryDeduplicator {
    seen: HashSet<u64>,
}

impl HistoryDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result; returns false if an equal record was already seen
    pub fn insert(&mut self, result: &NormalizedResult) -> bool {
        self.seen.insert(Self::key(result))
    }

    pub fn contains(&self, result: &NormalizedResult) -> bool {
        self.seen.contains(&Self::key(result))
    }

    /// Keep only results not seen before, recording them, preserving order
    pub fn filter_new<I>(&mut self, results: I) -> Vec<NormalizedResult>
    where
        I: IntoIterator<Item = NormalizedResult>,
    {
        results.into_iter().filter(|r| self.insert(r)).collect()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    fn key(result: &NormalizedResult) -> u64 {
        let key = format!(
            "{}\u{1f}{}\u{1f}{}",
            result.title,
            result.url,
            storage_label(result)
        );
        fast_hash(&key)
    }
}
