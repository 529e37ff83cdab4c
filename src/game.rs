//! Game driver
//!
//! Owns a session and a host. Engine callbacks (tap, contact, frame, removal)
//! become `HostEvent`s; the resulting effects are applied to the host in the
//! order they were emitted, so labels refresh within the same call.

use glam::Vec2;

use crate::consts::MAX_FRAME_DT;
use crate::host::Host;
use crate::settings::Settings;
use crate::sim::{self, Contact, Effect, EntityId, GameSession, HostEvent, TickInput};

pub struct Game<H: Host> {
    session: GameSession,
    host: H,
}

impl<H: Host> Game<H> {
    /// Create a game; call `start` before feeding events
    pub fn new(settings: Settings, host: H) -> Self {
        Self {
            session: GameSession::new(settings),
            host,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    /// Build the scene: container, labels, first preview
    pub fn start(&mut self) -> Vec<Effect> {
        let effects = sim::begin(&mut self.session);
        self.apply(&effects);
        effects
    }

    /// Player tapped at scene x
    pub fn tap(&mut self, x: f32) -> Vec<Effect> {
        self.dispatch(HostEvent::Tap { x })
    }

    /// Two shape bodies touched at `point`
    pub fn contact(&mut self, a: EntityId, b: EntityId, point: Vec2) -> Vec<Effect> {
        self.dispatch(HostEvent::Contact(Contact::shapes(a, b, point)))
    }

    /// Any contact, including against static geometry
    pub fn raw_contact(&mut self, contact: Contact) -> Vec<Effect> {
        self.dispatch(HostEvent::Contact(contact))
    }

    /// Frame elapsed; body state is read from the host
    pub fn frame(&mut self, dt: f32) -> Vec<Effect> {
        let input = TickInput {
            dt: dt.clamp(0.0, MAX_FRAME_DT),
            bodies: self.host.body_reports(),
        };
        self.dispatch(HostEvent::Tick(input))
    }

    /// The engine dropped a body on its own
    pub fn removed(&mut self, id: EntityId) -> Vec<Effect> {
        self.dispatch(HostEvent::Removed(id))
    }

    fn dispatch(&mut self, event: HostEvent) -> Vec<Effect> {
        let effects = sim::handle(&mut self.session, &event);
        self.apply(&effects);
        effects
    }

    fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            self.host.apply(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;

    fn game() -> Game<HeadlessHost> {
        let mut game = Game::new(
            Settings {
                seed: Some(5),
                ..Default::default()
            },
            HeadlessHost::new(),
        );
        game.start();
        game
    }

    #[test]
    fn test_start_builds_scene() {
        let game = game();
        let host = game.host();
        assert!(host.container.is_some());
        assert_eq!(host.title, "Shape Merge");
        assert_eq!(host.score_text, "Score: 0");
        assert_eq!(
            host.preview.as_ref().map(|p| p.kind),
            Some(game.session().spawner.next_kind())
        );
    }

    #[test]
    fn test_tap_mirrors_body_in_host() {
        let mut game = game();
        game.tap(150.0);
        assert_eq!(game.host().bodies.len(), 1);
        assert_eq!(game.session().entities.len(), 1);
    }

    #[test]
    fn test_frame_dt_clamped() {
        let mut game = game();
        game.frame(0.0);
        game.frame(10.0);
        assert!((game.session().monitor.elapsed() - MAX_FRAME_DT).abs() < 1e-6);
    }
}
