//! Spawn controller
//!
//! Picks the next shape kind with a seeded RNG, keeps the preview in sync and
//! drops tier 1 shapes on tap. Shapes fall from a fixed height above the
//! tapped column.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effect::Effect;
use super::factory::{PreviewSpec, build_body, build_preview};
use super::state::{GameSession, ShapeKind, ShapeTag};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct SpawnController {
    next_kind: ShapeKind,
    preview: Option<PreviewSpec>,
    rng: Pcg32,
}

impl SpawnController {
    /// Create a controller and draw the first kind
    pub fn new(seed: u64) -> Self {
        let mut controller = Self {
            next_kind: ShapeKind::Circle,
            preview: None,
            rng: Pcg32::seed_from_u64(seed),
        };
        controller.choose_next_kind();
        controller
    }

    pub fn next_kind(&self) -> ShapeKind {
        self.next_kind
    }

    pub fn preview(&self) -> Option<&PreviewSpec> {
        self.preview.as_ref()
    }

    /// Draw the next kind uniformly from all kinds
    pub fn choose_next_kind(&mut self) -> ShapeKind {
        let index = self.rng.random_range(0..ShapeKind::ALL.len());
        self.next_kind = ShapeKind::ALL[index];
        self.next_kind
    }

    /// Replace the preview with one of the current next kind
    pub fn show_preview(&mut self, settings: &Settings) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        effects.extend(self.clear_preview());

        let preview = build_preview(self.next_kind, settings);
        self.preview = Some(preview.clone());
        effects.push(Effect::ShowPreview { preview });
        effects
    }

    /// Remove the preview if one is shown
    pub fn clear_preview(&mut self) -> Option<Effect> {
        self.preview.take().map(|_| Effect::ClearPreview)
    }
}

/// Where a tap at `x` drops a shape of the given tag
pub fn drop_point(x: f32, tag: ShapeTag, settings: &Settings) -> Vec2 {
    let half_width = settings.shape_size(tag.tier);
    let x = settings.container().clamp_x(x, half_width);
    Vec2::new(x, settings.drop_y())
}

/// Drop the pending shape at the tapped column. No-op once the run is over.
pub fn spawn_at(session: &mut GameSession, x: f32) -> Vec<Effect> {
    if session.is_over() {
        log::debug!("Tap at x={} ignored: game over", x);
        return Vec::new();
    }

    let tag = ShapeTag::first(session.spawner.next_kind());
    let pos = drop_point(x, tag, &session.settings);
    let entity = session.insert_entity(tag, pos);
    let body = build_body(entity.id, tag, pos, &session.settings);
    log::debug!("Spawned {} #{} at {:?}", body.name, entity.id.0, pos);

    let mut effects = vec![Effect::SpawnBody { body }];
    session.spawner.choose_next_kind();
    effects.extend(session.spawner.show_preview(&session.settings));
    effects
}
