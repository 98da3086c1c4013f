//! Engine configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::search::constants::DEFAULT_POLL_INTERVAL_LOG2;
use crate::board::SearchOptions;

/// Deepest iteration the search may reach
pub const MAX_SEARCH_DEPTH: u32 = 64;

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("thread count must be at least 1")]
    ZeroThreads,
    #[error("max depth must be between 1 and {max}, got {found}")]
    BadDepth { found: u32, max: u32 },
    #[error("poll interval exponent must be at most 32, got {found}")]
    BadPollInterval { found: u32 },
}

/// Search settings used by [`crate::Engine`]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Time budget per search in milliseconds; 0 searches until stopped or
    /// `max_depth` is reached
    pub time_budget_ms: u64,
    pub max_depth: u32,
    /// Capture search at the horizon
    pub quiescence: bool,
    /// Threads searching root moves; 1 searches on the search thread alone
    pub threads: usize,
    /// The stop flag is polled every `2^poll_interval_log2` nodes
    pub poll_interval_log2: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            time_budget_ms: 1000,
            max_depth: MAX_SEARCH_DEPTH,
            quiescence: false,
            threads: 1,
            poll_interval_log2: DEFAULT_POLL_INTERVAL_LOG2,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_quiescence(mut self, enabled: bool) -> Self {
        self.quiescence = enabled;
        self
    }

    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    #[must_use]
    pub fn with_poll_interval_log2(mut self, log2: u32) -> Self {
        self.poll_interval_log2 = log2;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if self.max_depth == 0 || self.max_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::BadDepth {
                found: self.max_depth,
                max: MAX_SEARCH_DEPTH,
            });
        }
        if self.poll_interval_log2 > 32 {
            return Err(ConfigError::BadPollInterval {
                found: self.poll_interval_log2,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            quiescence: self.quiescence,
            poll_interval_log2: self.poll_interval_log2,
        }
    }
}
