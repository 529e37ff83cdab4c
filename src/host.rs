//! Host engine contract
//!
//! The physics/render engine owns every node and body. The session talks to
//! it only through `Host`: effects flow out, body reports flow back in.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::Container;
use crate::sim::{BodyReport, BodySpec, Effect, EntityId, PreviewSpec, ShapeTag};

/// Operations a physics/render engine provides to the game
pub trait Host {
    /// Create the static container walls
    fn add_container(&mut self, container: &Container);
    /// Create a dynamic shape node with its body
    fn add_body(&mut self, body: &BodySpec);
    /// Remove a shape node and its body
    fn remove_body(&mut self, id: EntityId);
    /// Show the visual-only preview node
    fn show_preview(&mut self, preview: &PreviewSpec);
    fn clear_preview(&mut self);
    fn set_title(&mut self, text: &str);
    /// Must update the label before returning
    fn set_score_text(&mut self, text: &str);
    /// Show a centred terminal message
    fn show_message(&mut self, text: &str);
    /// Position, velocity, dynamic flag and rest state of every shape body
    fn body_reports(&self) -> Vec<BodyReport>;

    /// Apply one effect
    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::AddContainer { container } => self.add_container(container),
            Effect::SetTitle { text } => self.set_title(text),
            Effect::SpawnBody { body } => self.add_body(body),
            Effect::RemoveBody { id } => self.remove_body(*id),
            Effect::ShowPreview { preview } => self.show_preview(preview),
            Effect::ClearPreview => self.clear_preview(),
            Effect::ScoreChanged { text, .. } => self.set_score_text(text),
            Effect::GameOver { message, .. } => self.show_message(message),
        }
    }
}

/// Points used to sample round outlines into a hull
const HULL_SEGMENTS: usize = 24;

/// A body held by `HeadlessHost`
#[derive(Debug, Clone, PartialEq)]
pub struct HostBody {
    pub spec: BodySpec,
    /// Collision hull relative to `pos`; the headless host only keeps polygons
    pub hull: Vec<Vec2>,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Set only by `settle`
    pub resting: bool,
}

/// Scene mirror with no dynamics.
///
/// Bodies stay where they are put; tests and the demo move them with
/// `set_motion`/`settle` and report contacts themselves.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    pub container: Option<Container>,
    pub title: String,
    pub score_text: String,
    pub message: Option<String>,
    pub preview: Option<PreviewSpec>,
    pub bodies: BTreeMap<EntityId, HostBody>,
}

impl HostBody {
    /// Identity read back from the node name, as a name-only engine would
    pub fn tag(&self) -> Option<ShapeTag> {
        ShapeTag::parse(&self.spec.name)
    }

    /// Distance from `pos` to the top of the hull
    pub fn top_extent(&self) -> f32 {
        self.hull.iter().map(|p| p.y).fold(0.0, f32::max)
    }
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self, id: EntityId) -> Option<&HostBody> {
        self.bodies.get(&id)
    }

    /// Ids of bodies carrying the given tag, in id order
    pub fn bodies_tagged(&self, tag: ShapeTag) -> Vec<EntityId> {
        self.bodies
            .values()
            .filter(|b| b.tag() == Some(tag))
            .map(|b| b.spec.id)
            .collect()
    }

    /// Move a body; it is no longer at rest. Returns false for unknown ids.
    pub fn set_motion(&mut self, id: EntityId, pos: Vec2, vel: Vec2) -> bool {
        self.place(id, pos, vel, false)
    }

    /// Place a body at rest
    pub fn settle(&mut self, id: EntityId, pos: Vec2) -> bool {
        self.place(id, pos, Vec2::ZERO, true)
    }

    fn place(&mut self, id: EntityId, pos: Vec2, vel: Vec2, resting: bool) -> bool {
        match self.bodies.get_mut(&id) {
            Some(body) => {
                body.pos = pos;
                body.vel = vel;
                body.resting = resting;
                true
            }
            None => false,
        }
    }
}

impl Host for HeadlessHost {
    fn add_container(&mut self, container: &Container) {
        self.container = Some(*container);
    }

    fn add_body(&mut self, body: &BodySpec) {
        self.bodies.insert(
            body.id,
            HostBody {
                spec: body.clone(),
                hull: body.outline.to_polygon(HULL_SEGMENTS),
                pos: body.pos,
                vel: Vec2::ZERO,
                resting: false,
            },
        );
    }

    fn remove_body(&mut self, id: EntityId) {
        self.bodies.remove(&id);
    }

    fn show_preview(&mut self, preview: &PreviewSpec) {
        self.preview = Some(preview.clone());
    }

    fn clear_preview(&mut self) {
        self.preview = None;
    }

    fn set_title(&mut self, text: &str) {
        self.title = text.to_string();
    }

    fn set_score_text(&mut self, text: &str) {
        self.score_text = text.to_string();
    }

    fn show_message(&mut self, text: &str) {
        self.message = Some(text.to_string());
    }

    fn body_reports(&self) -> Vec<BodyReport> {
        self.bodies
            .values()
            .map(|b| BodyReport {
                id: b.spec.id,
                pos: b.pos,
                vel: b.vel,
                dynamic: b.spec.physics.dynamic,
                resting: b.resting,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{ShapeKind, build_body};

    fn body(id: u32, kind: ShapeKind) -> BodySpec {
        build_body(
            EntityId(id),
            ShapeTag::first(kind),
            Vec2::new(100.0, 600.0),
            &Settings::default(),
        )
    }

    #[test]
    fn test_apply_spawn_and_remove() {
        let mut host = HeadlessHost::new();
        host.apply(&Effect::SpawnBody {
            body: body(1, ShapeKind::Circle),
        });
        assert_eq!(host.bodies.len(), 1);
        // Added with zero velocity, but not yet at rest
        let report = host.body_reports()[0];
        assert_eq!(report.vel, Vec2::ZERO);
        assert!(!report.is_resting(1.0));

        host.apply(&Effect::RemoveBody { id: EntityId(1) });
        assert!(host.bodies.is_empty());
    }

    #[test]
    fn test_apply_labels() {
        let mut host = HeadlessHost::new();
        host.apply(&Effect::ScoreChanged {
            score: 3,
            text: "Score: 3".to_string(),
        });
        host.apply(&Effect::GameOver {
            message: "Game Over".to_string(),
            score: 3,
        });
        assert_eq!(host.score_text, "Score: 3");
        assert_eq!(host.message.as_deref(), Some("Game Over"));
    }

    #[test]
    fn test_hull_matches_outline_height() {
        let mut host = HeadlessHost::new();
        for (id, kind) in ShapeKind::ALL.iter().enumerate() {
            let spec = body(id as u32, *kind);
            host.add_body(&spec);
            let held = host.body(spec.id).unwrap();
            assert!(held.hull.len() >= 3);
            assert!((held.top_extent() - spec.half_height()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_settle_and_tags() {
        let mut host = HeadlessHost::new();
        host.add_body(&body(1, ShapeKind::Circle));
        host.add_body(&body(2, ShapeKind::Square));
        host.add_body(&body(3, ShapeKind::Circle));

        assert_eq!(
            host.bodies_tagged(ShapeTag::first(ShapeKind::Circle)),
            vec![EntityId(1), EntityId(3)]
        );
        assert_eq!(
            host.body(EntityId(2)).and_then(HostBody::tag),
            Some(ShapeTag::first(ShapeKind::Square))
        );
        assert!(host.settle(EntityId(2), Vec2::new(50.0, 40.0)));
        assert!(!host.settle(EntityId(9), Vec2::ZERO));

        let report = host.body_reports()[1];
        assert_eq!(report.pos, Vec2::new(50.0, 40.0));
        assert!(report.is_resting(1.0));

        // Moving it again clears the rest state
        assert!(host.set_motion(EntityId(2), Vec2::new(50.0, 80.0), Vec2::ZERO));
        assert!(!host.body_reports()[1].is_resting(1.0));
    }
}
