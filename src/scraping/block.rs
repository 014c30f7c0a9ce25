//! Anti-bot challenge detection
//!
//! Advisory only: a flagged page is still handed to the extractor, since
//! challenge pages occasionally carry partial results.

use super::profile::SourceProfile;

/// Substring checks for challenge pages and genuine results pages
#[derive(Debug, Clone, Copy)]
pub struct BlockDetector {
    block_markers: &'static [&'static str],
    result_markers: &'static [&'static str],
}

impl BlockDetector {
    pub fn new(profile: &SourceProfile) -> Self {
        Self {
            block_markers: profile.block_markers,
            result_markers: profile.result_markers,
        }
    }

    /// Whether the body looks like a CAPTCHA / verification page
    pub fn is_blocked(&self, body: &str) -> bool {
        self.block_markers.iter().any(|m| body.contains(m))
    }

    /// Whether the body carries the source's results-page signature
    pub fn has_result_marker(&self, body: &str) -> bool {
        self.result_markers.iter().any(|m| body.contains(m))
    }
}
