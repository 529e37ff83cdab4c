//! Game-over monitor
//!
//! Once the grace period has passed, each resting shape is measured exactly
//! once. If its top edge is above the threshold line the run ends.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::EntityId;

/// Per-body state reported by the physics engine each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyReport {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Physics-active (static bodies never end the run)
    pub dynamic: bool,
    /// The engine's own rest-state query. A body that was just added has not
    /// come to rest yet, even with zero velocity.
    pub resting: bool,
}

impl BodyReport {
    /// At rest per the engine and no faster than `rest_speed`
    pub fn is_resting(&self, rest_speed: f32) -> bool {
        self.resting && self.vel.length() <= rest_speed
    }
}

/// Rule parameters for one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorRules {
    pub grace_period_secs: f32,
    pub rest_speed: f32,
    pub threshold_y: f32,
}

/// Result of one tick's evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Still inside the grace period; nothing evaluated
    Settling,
    /// No newly resting shape crossed the line
    Clear,
    /// A resting shape's top edge is above the line
    Crossed { id: EntityId, top: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct GameOverMonitor {
    /// Seconds since the first tick
    elapsed: f32,
    started: bool,
    /// Shapes already measured
    checked: BTreeSet<EntityId>,
}

impl GameOverMonitor {
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_checked(&self, id: EntityId) -> bool {
        self.checked.contains(&id)
    }

    pub fn checked_count(&self) -> usize {
        self.checked.len()
    }

    /// Advance the clock. The first tick starts it at zero.
    pub fn advance(&mut self, dt: f32) {
        if self.started {
            self.elapsed += dt.max(0.0);
        } else {
            self.started = true;
        }
    }

    /// Stop tracking a shape that left play
    pub fn forget(&mut self, id: EntityId) {
        self.checked.remove(&id);
    }

    /// Measure newly resting shapes.
    ///
    /// `half_height` resolves a live shape's half-height; reports for which
    /// it returns `None` are skipped. Evaluation stops at the first shape
    /// that crosses the line.
    pub fn evaluate<F>(&mut self, reports: &[BodyReport], rules: &MonitorRules, half_height: F) -> Verdict
    where
        F: Fn(EntityId) -> Option<f32>,
    {
        if self.elapsed < rules.grace_period_secs {
            return Verdict::Settling;
        }

        for report in reports {
            if !report.dynamic || !report.is_resting(rules.rest_speed) {
                continue;
            }
            if self.checked.contains(&report.id) {
                continue;
            }
            let Some(half) = half_height(report.id) else {
                continue;
            };

            self.checked.insert(report.id);
            let top = report.pos.y + half;
            if top > rules.threshold_y {
                return Verdict::Crossed { id: report.id, top };
            }
        }

        Verdict::Clear
    }
}
