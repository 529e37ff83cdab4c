//! Deterministic game rules
//!
//! All gameplay decisions live here. This module must be pure and deterministic:
//! - No engine, rendering or platform dependencies
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - Every change the host must mirror is returned as an `Effect`

pub mod effect;
pub mod factory;
pub mod merge;
pub mod monitor;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use effect::Effect;
pub use factory::{BodySpec, Outline, PhysicsSpec, PreviewSpec, build_body, build_preview};
pub use merge::{Contact, ContactBody, MergeOutcome, evaluate_contact, resolve_contact};
pub use monitor::{BodyReport, GameOverMonitor, MonitorRules, Verdict};
pub use score::ScoreTracker;
pub use spawn::{SpawnController, drop_point, spawn_at};
pub use state::{Entity, EntityId, GamePhase, GameSession, ShapeKind, ShapeTag};
pub use tick::{HostEvent, TickInput, begin, handle, tick};
