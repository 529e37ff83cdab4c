//! Game settings and layout tuning
//!
//! Loaded from an optional JSON file; any missing field takes its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Container;
use crate::consts::*;

/// Layout and tuning for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Title label text
    pub title: String,
    /// Text shown when the run ends
    pub game_over_message: String,

    // === Layout ===
    /// Scene size in scene units (y-up, origin bottom-left)
    pub scene_size: Vec2,
    /// Container width as a fraction of scene width
    pub container_width_frac: f32,
    /// Container height as a fraction of scene height
    pub container_height_frac: f32,
    /// Gap between scene bottom and container bottom
    pub container_bottom_margin: f32,
    /// Distance from the container top down to the game-over line
    pub threshold_inset: f32,
    /// Distance from the container top down to the drop height
    pub drop_inset: f32,
    /// Preview offset from the scene's top-left corner
    pub preview_offset: Vec2,
    /// Preview scale relative to a full tier 1 shape
    pub preview_scale: f32,

    // === Shapes ===
    /// Size of a tier 1 shape
    pub base_shape_size: f32,
    /// Size added per tier
    pub shape_size_per_tier: f32,
    /// Restitution of shape bodies
    pub restitution: f32,

    // === Rules ===
    /// Seconds before game-over checks begin
    pub grace_period_secs: f32,
    /// Speed at or below which a body is considered resting
    pub rest_speed: f32,
    /// Fixed RNG seed (random when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Shape Merge".to_string(),
            game_over_message: "Game Over".to_string(),

            scene_size: Vec2::new(390.0, 844.0),
            container_width_frac: 0.9,
            container_height_frac: 0.8,
            container_bottom_margin: 20.0,
            threshold_inset: 40.0,
            drop_inset: 30.0,
            preview_offset: Vec2::new(60.0, 60.0),
            preview_scale: 0.5,

            base_shape_size: BASE_SHAPE_SIZE,
            shape_size_per_tier: SHAPE_SIZE_PER_TIER,
            restitution: SHAPE_RESTITUTION,

            grace_period_secs: GRACE_PERIOD_SECS,
            rest_speed: REST_SPEED,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling gaps with defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// The play container derived from scene size
    pub fn container(&self) -> Container {
        let size = Vec2::new(
            self.scene_size.x * self.container_width_frac,
            self.scene_size.y * self.container_height_frac,
        );
        let center = Vec2::new(
            self.scene_size.x / 2.0,
            size.y / 2.0 + self.container_bottom_margin,
        );
        Container::new(center, size)
    }

    /// Y coordinate a resting shape's top edge must not exceed
    pub fn threshold_y(&self) -> f32 {
        self.container().top() - self.threshold_inset
    }

    /// Y coordinate new shapes are dropped from
    pub fn drop_y(&self) -> f32 {
        self.container().top() - self.drop_inset
    }

    /// Where the next-shape preview sits
    pub fn preview_position(&self) -> Vec2 {
        Vec2::new(
            self.preview_offset.x,
            self.scene_size.y - self.preview_offset.y,
        )
    }

    /// Rendered half-extent of a shape at the given tier
    pub fn shape_size(&self, tier: u32) -> f32 {
        let tier = tier.max(1);
        self.base_shape_size + (tier - 1) as f32 * self.shape_size_per_tier
    }
}
