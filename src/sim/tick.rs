//! Event dispatch
//!
//! The host engine drives the session with four kinds of events. Each call
//! mutates the session and returns the effects the host must apply, in order.

use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::factory::half_height_for;
use super::merge::{Contact, resolve_contact};
use super::monitor::{BodyReport, MonitorRules, Verdict};
use super::spawn::spawn_at;
use super::state::{EntityId, GamePhase, GameSession};

/// Per-frame input from the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Seconds since the previous frame
    pub dt: f32,
    /// State of every body the engine is simulating
    pub bodies: Vec<BodyReport>,
}

/// Everything the host can tell the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    /// Player tapped at scene x
    Tap { x: f32 },
    /// Two bodies touched
    Contact(Contact),
    /// A frame elapsed
    Tick(TickInput),
    /// The engine dropped a body on its own
    Removed(EntityId),
}

/// Opening effects: container, labels and the first preview.
/// Returns nothing if the session was already started.
pub fn begin(session: &mut GameSession) -> Vec<Effect> {
    if session.started {
        return Vec::new();
    }
    session.started = true;
    log::info!(
        "Session started, first shape {}",
        session.spawner.next_kind().name()
    );

    let mut effects = vec![
        Effect::AddContainer {
            container: session.settings.container(),
        },
        Effect::SetTitle {
            text: session.settings.title.clone(),
        },
        Effect::ScoreChanged {
            score: session.score.value(),
            text: session.score.text(),
        },
    ];
    effects.extend(session.spawner.show_preview(&session.settings));
    effects
}

/// Apply one host event to the session
pub fn handle(session: &mut GameSession, event: &HostEvent) -> Vec<Effect> {
    match event {
        HostEvent::Tap { x } => spawn_at(session, *x),
        HostEvent::Contact(contact) => resolve_contact(session, contact),
        HostEvent::Tick(input) => tick(session, input),
        HostEvent::Removed(id) => {
            if session.remove_entity(*id).is_some() {
                log::debug!("Host removed #{}", id.0);
            }
            Vec::new()
        }
    }
}

/// Advance one frame: sync positions, then run the game-over check
pub fn tick(session: &mut GameSession, input: &TickInput) -> Vec<Effect> {
    if session.is_over() {
        return Vec::new();
    }

    for report in &input.bodies {
        if let Some(entity) = session.entities.get_mut(&report.id) {
            entity.pos = report.pos;
        }
    }

    session.monitor.advance(input.dt);
    let rules = MonitorRules {
        grace_period_secs: session.settings.grace_period_secs,
        rest_speed: session.settings.rest_speed,
        threshold_y: session.settings.threshold_y(),
    };

    let entities = &session.entities;
    let settings = &session.settings;
    let verdict = session.monitor.evaluate(&input.bodies, &rules, |id| {
        entities.get(&id).map(|e| half_height_for(e.tag, settings))
    });

    match verdict {
        Verdict::Crossed { id, top } => {
            log::info!(
                "Game over: #{} rests with top {:.1} above line {:.1} (score {})",
                id.0,
                top,
                rules.threshold_y,
                session.score.value()
            );
            end_session(session)
        }
        Verdict::Settling | Verdict::Clear => Vec::new(),
    }
}

/// Move to `Over` and emit the closing effects
fn end_session(session: &mut GameSession) -> Vec<Effect> {
    session.phase = GamePhase::Over;
    let mut effects = Vec::with_capacity(2);
    effects.extend(session.spawner.clear_preview());
    effects.push(Effect::GameOver {
        message: session.settings.game_over_message.clone(),
        score: session.score.value(),
    });
    effects
}
