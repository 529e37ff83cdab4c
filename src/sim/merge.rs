//! Merge rule
//!
//! Two live shapes with the same kind and tier that touch are replaced by a
//! single shape one tier higher at the contact point. Contacts with the
//! container, with shapes the session no longer tracks, or between shapes
//! with different tags do nothing.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::factory::build_body;
use super::state::{Entity, EntityId, GameSession, ShapeTag};

/// One side of a contact as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactBody {
    Shape(EntityId),
    /// Container walls or any other static geometry
    Boundary,
}

/// Two bodies touched at `point`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub a: ContactBody,
    pub b: ContactBody,
    pub point: Vec2,
}

impl Contact {
    pub fn shapes(a: EntityId, b: EntityId, point: Vec2) -> Self {
        Self {
            a: ContactBody::Shape(a),
            b: ContactBody::Shape(b),
            point,
        }
    }
}

/// Decision for a single contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MergeOutcome {
    /// Not a contact between two distinct live shapes
    Ignored,
    /// Two shapes with different tags; physics handles the bounce
    NoMatch,
    /// Both shapes merge into `result`
    Merge {
        removed: [EntityId; 2],
        result: ShapeTag,
        point: Vec2,
        /// Points earned (pre-merge tier)
        points: u32,
    },
}

fn live_shape(entities: &BTreeMap<EntityId, Entity>, body: ContactBody) -> Option<&Entity> {
    match body {
        ContactBody::Shape(id) => entities.get(&id),
        ContactBody::Boundary => None,
    }
}

/// Decide what a contact does. Pure: does not touch the session.
pub fn evaluate_contact(entities: &BTreeMap<EntityId, Entity>, contact: &Contact) -> MergeOutcome {
    let (Some(a), Some(b)) = (
        live_shape(entities, contact.a),
        live_shape(entities, contact.b),
    ) else {
        return MergeOutcome::Ignored;
    };
    if a.id == b.id {
        return MergeOutcome::Ignored;
    }
    if a.tag != b.tag {
        return MergeOutcome::NoMatch;
    }

    MergeOutcome::Merge {
        removed: [a.id, b.id],
        result: a.tag.next(),
        point: contact.point,
        points: a.tag.tier,
    }
}

/// Apply a contact to the session and return the host effects
pub fn resolve_contact(session: &mut GameSession, contact: &Contact) -> Vec<Effect> {
    if session.is_over() {
        return Vec::new();
    }

    match evaluate_contact(&session.entities, contact) {
        MergeOutcome::Ignored => {
            log::trace!("Contact ignored: {:?}", contact);
            Vec::new()
        }
        MergeOutcome::NoMatch => Vec::new(),
        MergeOutcome::Merge {
            removed,
            result,
            point,
            points,
        } => {
            let mut effects = Vec::with_capacity(4);
            for id in removed {
                session.remove_entity(id);
                effects.push(Effect::RemoveBody { id });
            }

            let entity = session.insert_entity(result, point);
            let body = build_body(entity.id, result, point, &session.settings);
            log::debug!(
                "Merged #{} + #{} into {} #{}",
                removed[0].0,
                removed[1].0,
                body.name,
                entity.id.0
            );
            effects.push(Effect::SpawnBody { body });

            let score = session.score.add_merge(points);
            effects.push(Effect::ScoreChanged {
                score,
                text: session.score.text(),
            });
            effects
        }
    }
}
