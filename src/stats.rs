//! Run statistics
//!
//! Best survival time and attempt count, kept by the host between runs.
//! The host decides where the JSON lives.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::RunSummary;

/// Fresh profiles start with every level open
pub const ALL_LEVELS_UNLOCKED: u32 = 99;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// Longest survival (seconds) across all runs
    pub best_time: f32,
    pub attempts: u32,
    /// Highest level id the player may start
    pub unlocked_level: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            best_time: 0.0,
            attempts: 0,
            unlocked_level: ALL_LEVELS_UNLOCKED,
        }
    }
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a run as soon as it starts
    pub fn record_attempt(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }

    /// Fold a finished run in. Returns true on a new best time.
    pub fn record_run(&mut self, summary: &RunSummary) -> bool {
        if summary.survival_time > self.best_time {
            log::info!(
                "New best time {:.2}s (was {:.2}s)",
                summary.survival_time,
                self.best_time
            );
            self.best_time = summary.survival_time;
            return true;
        }
        false
    }

    /// Allow starting `level_id` (never locks levels again)
    pub fn unlock_level(&mut self, level_id: u32) {
        self.unlocked_level = self.unlocked_level.max(level_id);
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EndReason;

    fn run(time: f32) -> RunSummary {
        RunSummary {
            survival_time: time,
            loot_collected: 0,
            reason: EndReason::Bounds,
        }
    }

    #[test]
    fn test_record_run_tracks_best() {
        let mut stats = Stats::new();
        assert!(stats.record_run(&run(12.5)));
        assert!(!stats.record_run(&run(8.0)));
        assert!(!stats.record_run(&run(12.5)));
        assert!(stats.record_run(&run(20.0)));
        assert_eq!(stats.best_time, 20.0);
    }

    #[test]
    fn test_attempts_and_unlocks() {
        assert_eq!(Stats::new().unlocked_level, ALL_LEVELS_UNLOCKED);

        let mut stats = Stats {
            unlocked_level: 1,
            ..Stats::new()
        };
        stats.record_attempt();
        stats.record_attempt();
        assert_eq!(stats.attempts, 2);

        stats.unlock_level(3);
        stats.unlock_level(2);
        assert_eq!(stats.unlocked_level, 3);
    }

    #[test]
    fn test_old_saves_fill_missing_fields() {
        let stats = Stats::from_json(r#"{ "best_time": 42.0 }"#).unwrap();
        assert_eq!(stats.best_time, 42.0);
        assert_eq!(stats.attempts, 0);
        assert_eq!(stats.unlocked_level, ALL_LEVELS_UNLOCKED);
        assert!(Stats::from_json("not json").is_err());
    }
}
