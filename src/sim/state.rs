//! Game state and core simulation types
//!
//! The host engine owns every body; the session keeps only the logical
//! record (id, tag, last known position) needed to apply the rules.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::monitor::GameOverMonitor;
use super::score::ScoreTracker;
use super::spawn::SpawnController;
use crate::settings::Settings;

/// Shape families that can be dropped
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
        }
    }

    /// Look up a kind by name; unknown names resolve to `Circle`
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "circle" => ShapeKind::Circle,
            "square" => ShapeKind::Square,
            "triangle" => ShapeKind::Triangle,
            other => {
                log::debug!("Unknown shape kind {:?}, using circle", other);
                ShapeKind::Circle
            }
        }
    }

    /// Fill colour (RGBA)
    pub fn color(&self) -> [f32; 4] {
        match self {
            ShapeKind::Circle => [0.0, 0.478, 1.0, 1.0],
            ShapeKind::Square => [1.0, 0.231, 0.188, 1.0],
            ShapeKind::Triangle => [0.204, 0.780, 0.349, 1.0],
        }
    }
}

/// Merge identity of a shape: two shapes merge only when their tags are equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeTag {
    pub kind: ShapeKind,
    /// Merge level, starting at 1
    pub tier: u32,
}

impl ShapeTag {
    pub fn new(kind: ShapeKind, tier: u32) -> Self {
        Self {
            kind,
            tier: tier.max(1),
        }
    }

    /// Tier 1 tag for a freshly dropped shape
    pub fn first(kind: ShapeKind) -> Self {
        Self::new(kind, 1)
    }

    /// Tag of the shape two of these merge into
    pub fn next(&self) -> Self {
        Self::new(self.kind, self.tier + 1)
    }

    /// Display identity, e.g. `square_3`
    pub fn label(&self) -> String {
        format!("{}_{}", self.kind.name(), self.tier)
    }

    /// Read a `kind_tier` label back.
    ///
    /// Labels that do not split into exactly two parts are rejected. An
    /// unknown kind falls back to `Circle`, an unreadable tier to 1.
    pub fn parse(label: &str) -> Option<Self> {
        let mut parts = label.split('_');
        let (kind, tier) = match (parts.next(), parts.next(), parts.next()) {
            (Some(kind), Some(tier), None) => (kind, tier),
            _ => return None,
        };
        let tier = tier.parse::<u32>().unwrap_or(1);
        Some(Self::new(ShapeKind::from_name(kind), tier))
    }
}

/// Stable identity of an in-play shape; never reused within a session
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub u32);

/// A shape currently in play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub tag: ShapeTag,
    /// Last position reported by the host (or spawn position)
    pub pos: Vec2,
}

/// Session phase; `Over` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Over,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameSession {
    pub settings: Settings,
    /// Seed the spawn RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    pub score: ScoreTracker,
    pub spawner: SpawnController,
    pub monitor: GameOverMonitor,
    /// Live shapes keyed by id (ordered for deterministic iteration)
    pub entities: BTreeMap<EntityId, Entity>,
    /// Set once the opening effects have been emitted
    pub started: bool,
    next_id: u32,
}

impl GameSession {
    /// Create a session; a missing seed is drawn from the thread RNG
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("New session (seed {})", seed);
        Self {
            seed,
            phase: GamePhase::Running,
            score: ScoreTracker::default(),
            spawner: SpawnController::new(seed),
            monitor: GameOverMonitor::default(),
            entities: BTreeMap::new(),
            started: false,
            next_id: 1,
            settings,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a new shape and return its record
    pub fn insert_entity(&mut self, tag: ShapeTag, pos: Vec2) -> Entity {
        let id = self.next_entity_id();
        let entity = Entity { id, tag, pos };
        self.entities.insert(id, entity.clone());
        entity
    }

    /// Drop the session's record of a shape
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        self.monitor.forget(id);
        self.entities.remove(&id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }
}
