//! Configuration for dsearch

mod logging;
mod search;
mod session;
mod sources;

pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use search::SearchConfig;
pub use session::{DelayRange, SessionConfig, MAX_DELAY_SECS};
pub use sources::{SourceConfig, SourcesConfig};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::types::Source;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search limits
    #[serde(default)]
    pub search: SearchConfig,
    /// Request session behavior
    #[serde(default)]
    pub session: SessionConfig,
    /// Per-source settings
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config = Self::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file '{}': {}", path.display(), e))?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate all configuration fields.
    ///
    /// Collects every error and reports them together.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        // Search limits
        if self.search.per_source_cap == 0 {
            errors.push("per_source_cap must be positive".to_string());
        }
        if self.search.max_candidates == 0 {
            errors.push("max_candidates must be positive".to_string());
        }
        if self.search.deadline_secs == 0 {
            errors.push("deadline_secs must be positive".to_string());
        }

        // Session
        for (name, range) in [
            ("warmup_delay", &self.session.warmup_delay),
            ("query_delay", &self.session.query_delay),
            ("page_delay", &self.session.page_delay),
        ] {
            if !range.is_valid() {
                errors.push(format!(
                    "{} must satisfy 0 <= min_secs <= max_secs <= {}, got {}..{}",
                    name, MAX_DELAY_SECS, range.min_secs, range.max_secs
                ));
            }
        }
        if self.session.warmup_timeout_secs == 0 {
            errors.push("warmup_timeout_secs must be positive".to_string());
        }
        if self.session.request_timeout_secs == 0 {
            errors.push("request_timeout_secs must be positive".to_string());
        }

        // Sources
        if Source::ALL.iter().all(|s| !self.sources.get(*s).enabled) {
            errors.push("at least one source must be enabled".to_string());
        }
        for source in Source::ALL {
            let cfg = self.sources.get(source);
            for (field, value) in [("root_url", &cfg.root_url), ("search_url", &cfg.search_url)] {
                if let Some(value) = value {
                    if let Err(e) = Url::parse(value) {
                        errors.push(format!(
                            "sources.{}.{} is not a valid URL ({}): {}",
                            source.label().to_lowercase(),
                            field,
                            value,
                            e
                        ));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}
