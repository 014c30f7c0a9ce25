//! Search orchestration configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits applied to one search across all sources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results kept per source after relevance filtering
    pub per_source_cap: usize,
    /// Maximum candidates any single extraction strategy may emit
    pub max_candidates: usize,
    /// End-to-end deadline for one search (seconds)
    pub deadline_secs: u64,
}

impl SearchConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            per_source_cap: 5,
            max_candidates: 10,
            deadline_secs: 30,
        }
    }
}
