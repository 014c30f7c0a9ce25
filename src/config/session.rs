//! Request session configuration: humanizing delays, timeouts, randomness

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest single delay a range may ask for (one hour)
pub const MAX_DELAY_SECS: f64 = 3600.0;

/// Inclusive range of seconds to wait, sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl DelayRange {
    pub const fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    /// No delay at all
    pub const fn none() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn is_valid(&self) -> bool {
        self.min_secs.is_finite()
            && self.max_secs.is_finite()
            && self.min_secs >= 0.0
            && self.min_secs <= self.max_secs
            && self.max_secs <= MAX_DELAY_SECS
    }

    /// Sample a delay from the range, clamped to `[0, MAX_DELAY_SECS]`
    pub fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let secs = if self.is_valid() && self.max_secs > self.min_secs {
            rng.gen_range(self.min_secs..=self.max_secs)
        } else {
            self.min_secs
        };
        Duration::try_from_secs_f64(secs.clamp(0.0, MAX_DELAY_SECS)).unwrap_or(Duration::ZERO)
    }
}

/// Configuration shared by every source's request session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Warm-up request timeout (seconds)
    pub warmup_timeout_secs: u64,
    /// Search request timeout (seconds)
    pub request_timeout_secs: u64,
    /// Seed for user-agent and delay randomness; entropy when unset
    pub rng_seed: Option<u64>,
    /// Wait before the warm-up request
    pub warmup_delay: DelayRange,
    /// Wait between the warm-up and the search request
    pub query_delay: DelayRange,
    /// Wait between consecutive pages of a multi-page search
    pub page_delay: DelayRange,
}

impl SessionConfig {
    pub fn warmup_timeout(&self) -> Duration {
        Duration::from_secs(self.warmup_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Session settings with every delay disabled, for tests and local fixtures
    pub fn without_delays() -> Self {
        Self {
            warmup_delay: DelayRange::none(),
            query_delay: DelayRange::none(),
            page_delay: DelayRange::none(),
            ..Default::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            warmup_timeout_secs: 5,
            request_timeout_secs: 10,
            rng_seed: None,
            warmup_delay: DelayRange::new(2.0, 4.0),
            query_delay: DelayRange::new(1.0, 2.0),
            page_delay: DelayRange::new(2.0, 5.0),
        }
    }
}
