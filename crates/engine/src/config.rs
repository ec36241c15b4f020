//! Engine configuration from environment variables

use std::env;
use std::time::Duration;

use blockfall_core::UniformPieces;
use blockfall_types::SOFT_DROP_GRACE_MS;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Piece sequence seed; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Capacity of the command queue shared by input and gravity
    pub queue_depth: usize,
    /// Auto-release timeout for soft drop on terminals without key release events
    pub soft_drop_grace_ms: u64,
    /// File that receives log output; `None` keeps logging off while the
    /// terminal is in use
    pub log_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            queue_depth: 64,
            soft_drop_grace_ms: SOFT_DROP_GRACE_MS as u64,
            log_path: None,
        }
    }
}

impl EngineConfig {
    /// Load from `BLOCKFALL_SEED`, `BLOCKFALL_QUEUE_DEPTH`,
    /// `BLOCKFALL_SOFT_DROP_GRACE_MS` and `BLOCKFALL_LOG_PATH`. Unset or
    /// unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`EngineConfig::from_env`] with a custom variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let queue_depth = lookup("BLOCKFALL_QUEUE_DEPTH")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&depth: &usize| depth > 0)
            .unwrap_or(defaults.queue_depth);

        let soft_drop_grace_ms = lookup("BLOCKFALL_SOFT_DROP_GRACE_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.soft_drop_grace_ms);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            seed,
            queue_depth,
            soft_drop_grace_ms,
            log_path,
        }
    }

    pub fn soft_drop_grace(&self) -> Duration {
        Duration::from_millis(self.soft_drop_grace_ms)
    }

    /// Uniform piece source for this configuration
    pub fn piece_source(&self) -> UniformPieces {
        match self.seed {
            Some(seed) => UniformPieces::seeded(seed),
            None => UniformPieces::from_entropy(),
        }
    }
}
