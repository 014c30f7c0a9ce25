//! dsearch: Multi-Source Search-Result Extraction and Merge Engine
//!
//! Fetches result pages from independent web search sources, extracts
//! structured results from their undocumented HTML, and merges them:
//! - Browser-like request sessions with cookie warm-up and humanizing delays
//! - Advisory anti-bot page detection
//! - A semantic, link-heuristic and text-block extraction cascade
//! - Keyword relevance filtering and result normalization
//! - Concurrent per-source pipelines tolerating partial failure

pub mod config;
pub mod scraping;
pub mod search;
pub mod types;
pub mod util;

pub use config::Config;
pub use search::{SearchError, SearchOrchestrator, SearchReport};
pub use types::*;
