//! Extraction types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::types::RawCandidate;

/// Errors raised by a single extraction strategy
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Extraction strategies, in cascade order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Result cards matched by structural selectors
    Semantic,
    /// Anchors whose target looks like a result link
    LinkHeuristic,
    /// Generic text blocks, last resort
    TextBlock,
}

impl Strategy {
    /// Fixed priority order
    pub const CASCADE: [Strategy; 3] = [Strategy::Semantic, Strategy::LinkHeuristic, Strategy::TextBlock];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::LinkHeuristic => "link_heuristic",
            Self::TextBlock => "text_block",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of running the cascade over one page
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Candidates from the first strategy that produced any
    pub candidates: Vec<RawCandidate>,
    /// Strategy that produced `candidates`, if any did
    pub strategy: Option<Strategy>,
    /// Strategies tried, in order
    pub attempted: Vec<Strategy>,
    /// Strategy failures that were recovered from
    pub errors: Vec<String>,
}

/// Configuration for result extraction
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Maximum candidates per strategy
    pub max_candidates: usize,
    /// Accepted title length in characters (inclusive)
    pub min_title_chars: usize,
    pub max_title_chars: usize,
    /// Accepted summary length in characters (inclusive)
    pub min_summary_chars: usize,
    pub max_summary_chars: usize,
    /// Text-block length window in characters (min inclusive, max exclusive)
    pub min_block_chars: usize,
    pub max_block_chars: usize,
    /// Number of text blocks emitted by the fallback
    pub fallback_blocks: usize,
    /// Characters kept from each fallback block
    pub fallback_chars: usize,
    /// Result-card selectors replacing the source's built-in list (empty = built-in)
    pub result_selectors: Vec<String>,
}

impl ExtractorConfig {
    pub(crate) fn title_fits(&self, chars: usize) -> bool {
        (self.min_title_chars..=self.max_title_chars).contains(&chars)
    }

    pub(crate) fn summary_fits(&self, chars: usize) -> bool {
        (self.min_summary_chars..=self.max_summary_chars).contains(&chars)
    }

    pub(crate) fn block_fits(&self, chars: usize) -> bool {
        (self.min_block_chars..self.max_block_chars).contains(&chars)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_candidates: 10,
            min_title_chars: 5,
            max_title_chars: 200,
            min_summary_chars: 20,
            max_summary_chars: 300,
            min_block_chars: 50,
            max_block_chars: 500,
            fallback_blocks: 3,
            fallback_chars: 200,
            result_selectors: Vec::new(),
        }
    }
}
