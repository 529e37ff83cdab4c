//! Shape factory
//!
//! Turns a tag and a position into the body description handed to the host
//! engine. Outline and physics flags are identical for spawned and merged
//! shapes so both interact the same way.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::state::{EntityId, ShapeKind, ShapeTag};
use crate::consts::*;
use crate::settings::Settings;

/// Collision/render outline in body-local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outline {
    Circle { radius: f32 },
    RoundedRect { half_extent: f32, corner_radius: f32 },
    Polygon { points: Vec<Vec2> },
}

impl Outline {
    /// Outline for a shape of the given kind and size (half-extent)
    pub fn for_shape(kind: ShapeKind, size: f32) -> Self {
        match kind {
            ShapeKind::Circle => Outline::Circle { radius: size },
            ShapeKind::Square => Outline::RoundedRect {
                half_extent: size,
                corner_radius: SQUARE_CORNER_RADIUS,
            },
            ShapeKind::Triangle => Outline::Polygon {
                points: vec![
                    Vec2::new(0.0, size),
                    Vec2::new(-size, -size),
                    Vec2::new(size, -size),
                ],
            },
        }
    }

    /// Distance from the body origin to its top edge
    pub fn half_height(&self) -> f32 {
        match self {
            Outline::Circle { radius } => *radius,
            Outline::RoundedRect { half_extent, .. } => *half_extent,
            Outline::Polygon { points } => points.iter().map(|p| p.y).fold(0.0, f32::max),
        }
    }

    /// Uniformly scaled copy
    pub fn scaled(&self, scale: f32) -> Self {
        match self {
            Outline::Circle { radius } => Outline::Circle {
                radius: radius * scale,
            },
            Outline::RoundedRect {
                half_extent,
                corner_radius,
            } => Outline::RoundedRect {
                half_extent: half_extent * scale,
                corner_radius: corner_radius * scale,
            },
            Outline::Polygon { points } => Outline::Polygon {
                points: points.iter().map(|p| *p * scale).collect(),
            },
        }
    }

    /// Boundary points for hosts that only accept polygons.
    ///
    /// Circles are sampled with `segments` points; rounded corners are
    /// flattened to their bounding square.
    pub fn to_polygon(&self, segments: usize) -> Vec<Vec2> {
        match self {
            Outline::Circle { radius } => {
                let n = segments.max(3);
                (0..n)
                    .map(|i| {
                        let theta = i as f32 / n as f32 * TAU;
                        Vec2::new(theta.cos(), theta.sin()) * *radius
                    })
                    .collect()
            }
            Outline::RoundedRect { half_extent, .. } => {
                let h = *half_extent;
                vec![
                    Vec2::new(-h, -h),
                    Vec2::new(h, -h),
                    Vec2::new(h, h),
                    Vec2::new(-h, h),
                ]
            }
            Outline::Polygon { points } => points.clone(),
        }
    }
}

/// Rigid-body parameters for the host physics engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsSpec {
    pub dynamic: bool,
    pub restitution: f32,
    pub category_mask: u32,
    pub contact_mask: u32,
    pub collision_mask: u32,
}

impl PhysicsSpec {
    /// Dynamic body in the shared shape category
    pub fn shape(restitution: f32) -> Self {
        Self {
            dynamic: true,
            restitution,
            category_mask: SHAPE_CATEGORY,
            contact_mask: SHAPE_CATEGORY,
            collision_mask: SHAPE_CATEGORY,
        }
    }
}

/// Everything the host needs to create a shape body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub id: EntityId,
    pub tag: ShapeTag,
    /// Node name, `kind_tier`
    pub name: String,
    pub pos: Vec2,
    pub outline: Outline,
    pub color: [f32; 4],
    pub physics: PhysicsSpec,
}

impl BodySpec {
    pub fn half_height(&self) -> f32 {
        self.outline.half_height()
    }
}

/// Visual-only preview of the next shape (no physics body)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewSpec {
    pub kind: ShapeKind,
    pub pos: Vec2,
    pub scale: f32,
    pub outline: Outline,
    pub color: [f32; 4],
}

/// Build a shape body for the host
pub fn build_body(id: EntityId, tag: ShapeTag, pos: Vec2, settings: &Settings) -> BodySpec {
    let size = settings.shape_size(tag.tier);
    BodySpec {
        id,
        tag,
        name: tag.label(),
        pos,
        outline: Outline::for_shape(tag.kind, size),
        color: tag.kind.color(),
        physics: PhysicsSpec::shape(settings.restitution),
    }
}

/// Build the half-scale tier 1 preview shown at the preview position
pub fn build_preview(kind: ShapeKind, settings: &Settings) -> PreviewSpec {
    let scale = settings.preview_scale;
    PreviewSpec {
        kind,
        pos: settings.preview_position(),
        scale,
        outline: Outline::for_shape(kind, settings.shape_size(1)).scaled(scale),
        color: kind.color(),
    }
}

/// Half-height of a shape at the given tier
pub fn half_height_for(tag: ShapeTag, settings: &Settings) -> f32 {
    Outline::for_shape(tag.kind, settings.shape_size(tag.tier)).half_height()
}
