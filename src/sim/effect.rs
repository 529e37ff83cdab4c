//! Effects the host must apply after an event
//!
//! Effects are emitted in order; a host that applies them in order keeps its
//! scene (and score label) in lockstep with the session.

use serde::{Deserialize, Serialize};

use super::factory::{BodySpec, PreviewSpec};
use super::state::EntityId;
use crate::Container;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Create the static container walls
    AddContainer { container: Container },
    /// Set the title label
    SetTitle { text: String },
    /// Create a dynamic shape body
    SpawnBody { body: BodySpec },
    /// Remove a shape body
    RemoveBody { id: EntityId },
    /// Show the next-shape preview
    ShowPreview { preview: PreviewSpec },
    /// Remove the next-shape preview
    ClearPreview,
    /// Score changed; refresh the label
    ScoreChanged { score: u64, text: String },
    /// Run ended
    GameOver { message: String, score: u64 },
}
