//! Caller-facing half of the search engine
//!
//! Turns per-source extractions into one merged result set:
//! - `relevance`: keyword filter over extracted candidates
//! - `normalize`: canonical result records and source labels
//! - `merge`: per-source capped, source-ordered concatenation
//! - `orchestrator`: concurrent pipelines, deadline and partial-failure handling
//! - `diagnostics`: structured events emitted along the way
//! - `history`: storage-side deduplication across searches

pub mod diagnostics;
pub mod history;
pub mod merge;
pub mod normalize;
pub mod orchestrator;
pub mod relevance;

pub use diagnostics::{DiagnosticEvent, DiagnosticsSink, EventKind, MemorySink, TracingSink};
pub use history::{storage_label, HistoryDeduplicator};
pub use merge::MergeDeduplicator;
pub use normalize::normalize;
pub use orchestrator::{
    PipelineState, SearchError, SearchOrchestrator, SearchReport, SearchState, SourceFailure,
    SourcePipeline, SourceReport,
};
pub use relevance::is_relevant;
