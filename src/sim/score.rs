//! Score tracking

use serde::{Deserialize, Serialize};

/// Points earned this run. Only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u64,
}

impl ScoreTracker {
    pub fn value(&self) -> u64 {
        self.score
    }

    /// Credit a merge of two shapes at `tier`; returns the new total
    pub fn add_merge(&mut self, tier: u32) -> u64 {
        self.score = self.score.saturating_add(u64::from(tier));
        self.score
    }

    /// Text for the score label
    pub fn text(&self) -> String {
        format!("Score: {}", self.score)
    }
}
