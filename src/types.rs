//! Core types for the dsearch engine

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Title used when a result carries no usable title
pub const UNTITLED: &str = "Untitled";

// ============================================================================
// Sources
// ============================================================================

/// A search source. Order of declaration is merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Baidu,
    Bilibili,
}

impl Source {
    /// All sources in merge order
    pub const ALL: [Source; 2] = [Source::Baidu, Source::Bilibili];

    /// Canonical label attached to normalized results
    pub fn label(&self) -> &'static str {
        match self {
            Self::Baidu => "Baidu",
            Self::Bilibili => "Bilibili",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Invalid search input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("search keyword must not be empty")]
    EmptyKeyword,
    #[error("page must be at least 1")]
    InvalidPage,
    #[error("page must be at most {max}")]
    PageOutOfRange { max: u32 },
}

/// Results per source page
pub const RESULTS_PER_PAGE: u32 = 10;

/// Highest page whose result offset fits in a `u32`
pub const MAX_PAGE: u32 = u32::MAX / RESULTS_PER_PAGE + 1;

/// A validated search request, shared by every source pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    keyword: String,
    page: u32,
}

impl SearchRequest {
    /// Validate and trim a keyword and page
    pub fn new(keyword: &str, page: u32) -> Result<Self, QueryError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(QueryError::EmptyKeyword);
        }
        if page == 0 {
            return Err(QueryError::InvalidPage);
        }
        if page > MAX_PAGE {
            return Err(QueryError::PageOutOfRange { max: MAX_PAGE });
        }
        Ok(Self {
            keyword: keyword.to_string(),
            page,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// The per-source query for this request
    pub fn query_for(&self, source: Source) -> Query {
        Query {
            keyword: self.keyword.clone(),
            page: self.page,
            source,
        }
    }
}

/// Immutable query bound to a single source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub keyword: String,
    pub page: u32,
    pub source: Source,
}

impl Query {
    /// Zero-based result offset for the page (10 results per page)
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(RESULTS_PER_PAGE)
    }
}

// ============================================================================
// Extraction records
// ============================================================================

/// How a candidate was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    /// Parsed from result structure (title/url/summary fields)
    Structured,
    /// Generic text block captured when structure could not be interpreted
    TextFallback,
}

/// Partially-populated record produced by a source extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub kind: CandidateKind,
    pub title: Option<String>,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub author: Option<String>,
    pub stats: Option<String>,
    /// Sub-origin shown by the source for this result (e.g. the hosting site name)
    pub origin: Option<String>,
    /// Truncated text blob, only set on `TextFallback` candidates
    pub content: Option<String>,
}

impl RawCandidate {
    /// Empty structured candidate with the given title
    pub fn structured(title: impl Into<String>) -> Self {
        Self {
            kind: CandidateKind::Structured,
            title: Some(title.into()),
            url: None,
            summary: None,
            author: None,
            stats: None,
            origin: None,
            content: None,
        }
    }

    /// Text-fallback candidate carrying only a text blob
    pub fn text_fallback(content: impl Into<String>) -> Self {
        Self {
            kind: CandidateKind::TextFallback,
            title: None,
            url: None,
            summary: None,
            author: None,
            stats: None,
            origin: None,
            content: Some(content.into()),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_stats(mut self, stats: impl Into<String>) -> Self {
        self.stats = Some(stats.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn is_text_fallback(&self) -> bool {
        self.kind == CandidateKind::TextFallback
    }

    /// A candidate is worth keeping only if it has a title or content text
    pub fn is_usable(&self) -> bool {
        let non_empty = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        non_empty(&self.title) || non_empty(&self.content)
    }
}

// ============================================================================
// Output records
// ============================================================================

/// Canonical result record handed to callers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub source: String,
}

/// Source-ordered, per-source capped output of a search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergedResultSet {
    results: Vec<NormalizedResult>,
}

impl MergedResultSet {
    pub(crate) fn from_vec(results: Vec<NormalizedResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedResult> {
        self.results.iter()
    }

    pub fn as_slice(&self) -> &[NormalizedResult] {
        &self.results
    }

    pub fn into_vec(self) -> Vec<NormalizedResult> {
        self.results
    }
}

impl IntoIterator for MergedResultSet {
    type Item = NormalizedResult;
    type IntoIter = std::vec::IntoIter<NormalizedResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a MergedResultSet {
    type Item = &'a NormalizedResult;
    type IntoIter = std::slice::Iter<'a, NormalizedResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
