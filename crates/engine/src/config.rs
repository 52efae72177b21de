use std::env;

use crate::types::BASE_TICK_MS;

/// Match configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Interval between two steps of one player, before soft-pause slowdown.
    pub base_tick_ms: u32,
    /// Seed for piece draws and agent jitter. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Append a JSON snapshot line here after every lock.
    pub snapshot_log_path: Option<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            base_tick_ms: BASE_TICK_MS,
            seed: None,
            snapshot_log_path: None,
        }
    }
}

impl MatchConfig {
    /// Create from environment variables
    ///
    /// - `DUEL_TICK_MS`: base step interval (default 500, must be > 0)
    /// - `DUEL_SEED`: u64 seed (default: entropy)
    /// - `DUEL_SNAPSHOT_LOG`: snapshot log path (default: none)
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`MatchConfig::from_env`] with a custom variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_tick_ms = lookup("DUEL_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(BASE_TICK_MS);

        let seed = lookup("DUEL_SEED").and_then(|s| s.trim().parse().ok());

        let snapshot_log_path = lookup("DUEL_SNAPSHOT_LOG")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            base_tick_ms,
            seed,
            snapshot_log_path,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
