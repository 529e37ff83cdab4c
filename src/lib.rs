//! Shape Merge - a drop-and-merge shape puzzle
//!
//! Core modules:
//! - `sim`: Deterministic game rules (spawn, merge, game-over, scoring)
//! - `host`: Contract with the physics/render engine that owns the bodies
//! - `game`: Driver wiring host callbacks into the simulation
//! - `settings`: Data-driven layout and tuning

pub mod game;
pub mod host;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use host::{HeadlessHost, Host};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Size (half-extent) of a tier 1 shape
    pub const BASE_SHAPE_SIZE: f32 = 20.0;
    /// Size added per tier above 1
    pub const SHAPE_SIZE_PER_TIER: f32 = 10.0;
    /// Corner radius of square outlines
    pub const SQUARE_CORNER_RADIUS: f32 = 4.0;

    /// Bounciness of every shape body
    pub const SHAPE_RESTITUTION: f32 = 0.2;
    /// All shapes share one collision category
    pub const SHAPE_CATEGORY: u32 = 1;

    /// Seconds of simulation before game-over checks start
    pub const GRACE_PERIOD_SECS: f32 = 1.0;
    /// Speed at or below which a body counts as resting
    pub const REST_SPEED: f32 = 1.0;

    /// Longest frame delta accepted by the driver (prevents huge catch-up steps)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Axis-aligned play container, y-up
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Container {
    pub center: Vec2,
    pub size: Vec2,
}

impl Container {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    /// Clamp an x coordinate so a shape of the given half-width stays between the walls
    pub fn clamp_x(&self, x: f32, half_width: f32) -> f32 {
        let lo = self.left() + half_width;
        let hi = self.right() - half_width;
        if lo > hi { self.center.x } else { x.clamp(lo, hi) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_edges() {
        let c = Container::new(Vec2::new(100.0, 200.0), Vec2::new(80.0, 40.0));
        assert_eq!(c.left(), 60.0);
        assert_eq!(c.right(), 140.0);
        assert_eq!(c.top(), 220.0);
        assert_eq!(c.bottom(), 180.0);
    }

    #[test]
    fn test_container_clamp_x() {
        let c = Container::new(Vec2::new(100.0, 200.0), Vec2::new(80.0, 40.0));
        assert_eq!(c.clamp_x(0.0, 10.0), 70.0);
        assert_eq!(c.clamp_x(500.0, 10.0), 130.0);
        assert_eq!(c.clamp_x(95.0, 10.0), 95.0);
        // Wider than the container: centre it
        assert_eq!(c.clamp_x(0.0, 60.0), 100.0);
    }
}
