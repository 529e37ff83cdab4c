//! Property tests for the merge rule and the game-over policy

use glam::Vec2;
use proptest::prelude::*;

use shape_merge::Settings;
use shape_merge::sim::{
    BodyReport, Contact, Effect, GamePhase, GameSession, HostEvent, PhysicsSpec, ShapeKind,
    ShapeTag, TickInput, handle, resolve_contact,
};

fn session() -> GameSession {
    GameSession::new(Settings {
        seed: Some(77),
        ..Default::default()
    })
}

fn any_kind() -> impl Strategy<Value = ShapeKind> {
    prop::sample::select(ShapeKind::ALL.to_vec())
}

fn event() -> impl Strategy<Value = HostEvent> {
    prop_oneof![
        (0.0f32..400.0).prop_map(|x| HostEvent::Tap { x }),
        (0.0f32..0.2).prop_map(|dt| HostEvent::Tick(TickInput {
            dt,
            bodies: Vec::new()
        })),
    ]
}

proptest! {
    #[test]
    fn equal_tags_always_merge(kind in any_kind(), tier in 1u32..12, x in 0.0f32..400.0, y in 0.0f32..800.0) {
        let mut s = session();
        let tag = ShapeTag::new(kind, tier);
        let a = s.insert_entity(tag, Vec2::ZERO);
        let b = s.insert_entity(tag, Vec2::ZERO);
        let point = Vec2::new(x, y);

        let effects = resolve_contact(&mut s, &Contact::shapes(a.id, b.id, point));

        prop_assert_eq!(s.entities.len(), 1);
        let merged = s.entities.values().next().unwrap();
        prop_assert_eq!(merged.tag, ShapeTag::new(kind, tier + 1));
        prop_assert_eq!(merged.pos, point);
        prop_assert_eq!(s.score.value(), u64::from(tier));
        let spawned: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::SpawnBody { body } => Some(body),
                _ => None,
            })
            .collect();
        let removals = effects.iter().filter(|e| matches!(e, Effect::RemoveBody { .. })).count();
        prop_assert_eq!(spawned.len(), 1);
        prop_assert_eq!(removals, 2);
        prop_assert_eq!(spawned[0].physics, PhysicsSpec::shape(s.settings.restitution));
        prop_assert!(spawned[0].physics.dynamic);
    }

    #[test]
    fn different_tags_never_merge(
        kind_a in any_kind(), kind_b in any_kind(),
        tier_a in 1u32..6, tier_b in 1u32..6,
    ) {
        prop_assume!(kind_a != kind_b || tier_a != tier_b);
        let mut s = session();
        let a = s.insert_entity(ShapeTag::new(kind_a, tier_a), Vec2::ZERO);
        let b = s.insert_entity(ShapeTag::new(kind_b, tier_b), Vec2::ZERO);

        let effects = resolve_contact(&mut s, &Contact::shapes(a.id, b.id, Vec2::ZERO));

        prop_assert!(effects.is_empty());
        prop_assert_eq!(s.entities.len(), 2);
        prop_assert_eq!(s.score.value(), 0);
    }

    #[test]
    fn over_is_terminal(events in prop::collection::vec(event(), 1..40)) {
        let mut s = session();
        let tag = ShapeTag::first(ShapeKind::Circle);
        let a = s.insert_entity(tag, Vec2::ZERO);
        let b = s.insert_entity(tag, Vec2::ZERO);
        s.phase = GamePhase::Over;

        for event in &events {
            prop_assert!(handle(&mut s, event).is_empty());
            prop_assert_eq!(s.phase, GamePhase::Over);
        }
        prop_assert!(handle(&mut s, &HostEvent::Contact(Contact::shapes(a.id, b.id, Vec2::ZERO))).is_empty());
        prop_assert_eq!(s.entities.len(), 2);
    }

    #[test]
    fn no_game_over_during_grace(dts in prop::collection::vec(0.0f32..0.05, 1..20)) {
        // At most 19 frames of < 0.05 s after the first: under one second
        let mut s = session();
        let e = s.insert_entity(ShapeTag::first(ShapeKind::Square), Vec2::ZERO);
        let high = Vec2::new(195.0, 10_000.0);

        for dt in dts {
            let report = BodyReport { id: e.id, pos: high, vel: Vec2::ZERO, dynamic: true, resting: true };
            let effects = handle(&mut s, &HostEvent::Tick(TickInput { dt, bodies: vec![report] }));
            prop_assert!(effects.is_empty());
        }
        prop_assert_eq!(s.phase, GamePhase::Running);
        prop_assert!(!s.monitor.is_checked(e.id));
    }

    #[test]
    fn each_shape_checked_at_most_once(count in 1usize..12, frames in 2usize..30) {
        let mut s = session();
        let ids: Vec<_> = (0..count)
            .map(|i| s.insert_entity(ShapeTag::first(ShapeKind::Triangle), Vec2::new(i as f32 * 10.0, 50.0)).id)
            .collect();
        let reports: Vec<_> = ids
            .iter()
            .map(|id| BodyReport { id: *id, pos: Vec2::new(0.0, 50.0), vel: Vec2::ZERO, dynamic: true, resting: true })
            .collect();

        // Start the clock, pass the grace period
        handle(&mut s, &HostEvent::Tick(TickInput { dt: 0.0, bodies: Vec::new() }));
        for _ in 0..frames {
            handle(&mut s, &HostEvent::Tick(TickInput { dt: 1.0, bodies: reports.clone() }));
            prop_assert_eq!(s.monitor.checked_count(), count);
        }
        prop_assert_eq!(s.phase, GamePhase::Running);
    }
}
