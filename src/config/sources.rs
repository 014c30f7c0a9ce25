//! Per-source configuration

use serde::{Deserialize, Serialize};

use crate::types::Source;

/// Settings for one search source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Include this source in searches
    pub enabled: bool,
    /// Landing page used for the warm-up request (defaults to the built-in URL)
    pub root_url: Option<String>,
    /// Search endpoint without query string (defaults to the built-in URL)
    pub search_url: Option<String>,
    /// Result-card selectors replacing the built-in whitelist (empty = built-in)
    pub result_selectors: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            root_url: None,
            search_url: None,
            result_selectors: Vec::new(),
        }
    }
}

/// Configuration for all sources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub baidu: SourceConfig,
    pub bilibili: SourceConfig,
}

impl SourcesConfig {
    pub fn get(&self, source: Source) -> &SourceConfig {
        match source {
            Source::Baidu => &self.baidu,
            Source::Bilibili => &self.bilibili,
        }
    }
}
