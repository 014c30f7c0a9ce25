//! Structured diagnostics emitted while a search runs

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scraping::Strategy;
use crate::types::Source;

/// One diagnostic event, tagged with the search that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    pub search_id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl DiagnosticEvent {
    pub fn new(search_id: Uuid, kind: EventKind) -> Self {
        Self {
            search_id,
            timestamp: Utc::now(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    /// Search page fetched
    FetchCompleted {
        source: Source,
        status: u16,
        bytes: usize,
        /// Anti-bot markers found (advisory)
        blocked: bool,
        /// Results-page signature found
        result_marker: bool,
    },
    /// Extraction cascade finished for a page
    ExtractionCompleted {
        source: Source,
        strategy: Option<Strategy>,
        candidate_count: usize,
        errors: Vec<String>,
    },
    /// A source pipeline failed
    SourceFailed { source: Source, reason: String },
    /// The whole search finished
    SearchCompleted {
        results: usize,
        failed_sources: Vec<Source>,
    },
}

/// Receiver of diagnostic events
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: DiagnosticEvent);
}

/// Default sink: logs events through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: DiagnosticEvent) {
        let search_id = event.search_id;
        match event.kind {
            EventKind::FetchCompleted {
                source,
                status,
                bytes,
                blocked,
                result_marker,
            } => {
                if blocked {
                    tracing::warn!(%search_id, %source, status, bytes, "Page looks like an anti-bot challenge");
                } else {
                    tracing::debug!(%search_id, %source, status, bytes, result_marker, "Fetch completed");
                }
            }
            EventKind::ExtractionCompleted {
                source,
                strategy,
                candidate_count,
                errors,
            } => {
                let strategy = strategy.map(|s| s.as_str()).unwrap_or("none");
                if candidate_count == 0 {
                    tracing::info!(%search_id, %source, ?errors, "Extraction produced no candidates");
                } else {
                    tracing::debug!(%search_id, %source, strategy, candidate_count, "Extraction completed");
                }
            }
            EventKind::SourceFailed { source, reason } => {
                tracing::warn!(%search_id, %source, "Source failed: {}", reason);
            }
            EventKind::SearchCompleted {
                results,
                failed_sources,
            } => {
                tracing::info!(%search_id, results, ?failed_sources, "Search completed");
            }
        }
    }
}

/// Sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().clone()
    }

    /// Remove and return recorded events
    pub fn take(&self) -> Vec<DiagnosticEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl DiagnosticsSink for MemorySink {
    fn record(&self, event: DiagnosticEvent) {
        self.events.lock().push(event);
    }
}
