//! Shape Merge headless demo
//!
//! Plays a scripted session against `HeadlessHost` and prints every effect
//! as a JSON line. Shapes are stacked into columns by hand (there is no
//! physics engine here); equal neighbours in a column are reported as
//! contacts, so merges cascade the way they would on a real stack.
//!
//! Usage: `shape-merge [settings.json]`

use std::path::Path;

use glam::Vec2;

use shape_merge::sim::{Effect, EntityId};
use shape_merge::{Game, HeadlessHost, Settings};

/// Seed used when the settings file does not set one
const DEMO_SEED: u64 = 2025;
/// Column x positions (scene units)
const COLUMNS: [f32; 3] = [90.0, 195.0, 300.0];
/// Frame length fed to the game
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames simulated after each drop
const FRAMES_PER_DROP: u32 = 30;
/// Give up after this many drops
const MAX_DROPS: u32 = 500;

fn main() {
    env_logger::init();

    let mut settings = std::env::args()
        .nth(1)
        .map(|path| Settings::load(Path::new(&path)))
        .unwrap_or_default();
    settings.seed = settings.seed.or(Some(DEMO_SEED));
    log::info!("Shape Merge (headless) starting...");

    let mut game = Game::new(settings, HeadlessHost::new());
    emit(&game.start());

    let mut stacks: Vec<Vec<EntityId>> = vec![Vec::new(); COLUMNS.len()];
    let mut drops = 0;

    while !game.is_over() && drops < MAX_DROPS {
        let column = pick_column(&game, &stacks, drops);
        let effects = game.tap(COLUMNS[column]);
        emit(&effects);
        drops += 1;

        // Let the shape fall for a while before it lands
        for _ in 0..FRAMES_PER_DROP / 2 {
            emit(&game.frame(FRAME_DT));
        }

        if let Some(id) = spawned_id(&effects) {
            stacks[column].push(id);
        }
        restack(&mut game, &stacks[column], COLUMNS[column]);
        merge_column(&mut game, &mut stacks[column], COLUMNS[column]);

        for _ in 0..FRAMES_PER_DROP / 2 {
            if game.is_over() {
                break;
            }
            emit(&game.frame(FRAME_DT));
        }
    }

    let session = game.session();
    log::info!(
        "Finished after {} drops: score {}, {} shapes in play, over={}",
        drops,
        session.score.value(),
        session.entities.len(),
        game.is_over()
    );
}

/// Prefer the column whose top shape matches the pending kind at tier 1
fn pick_column(game: &Game<HeadlessHost>, stacks: &[Vec<EntityId>], drops: u32) -> usize {
    let next = game.session().spawner.next_kind();
    stacks
        .iter()
        .position(|stack| {
            stack
                .last()
                .and_then(|id| game.session().entity(*id))
                .is_some_and(|e| e.tag.kind == next && e.tag.tier == 1)
        })
        .unwrap_or(drops as usize % COLUMNS.len())
}

fn spawned_id(effects: &[Effect]) -> Option<EntityId> {
    effects.iter().find_map(|e| match e {
        Effect::SpawnBody { body } => Some(body.id),
        _ => None,
    })
}

/// Lay a column's shapes on top of each other, resting
fn restack(game: &mut Game<HeadlessHost>, stack: &[EntityId], x: f32) {
    let Some(mut floor) = game.host().container.map(|c| c.bottom()) else {
        return;
    };
    for id in stack {
        let Some(half) = game.host().body(*id).map(|b| b.top_extent()) else {
            continue;
        };
        game.host_mut().settle(*id, Vec2::new(x, floor + half));
        floor += half * 2.0;
    }
}

/// Report contacts between equal neighbours at the top of a column until none remain
fn merge_column(game: &mut Game<HeadlessHost>, stack: &mut Vec<EntityId>, x: f32) {
    while stack.len() >= 2 {
        let upper = stack[stack.len() - 1];
        let lower = stack[stack.len() - 2];
        let point = match (game.host().body(upper), game.host().body(lower)) {
            (Some(u), Some(l)) => (u.pos + l.pos) / 2.0,
            _ => break,
        };

        let effects = game.contact(lower, upper, point);
        emit(&effects);
        let Some(merged) = spawned_id(&effects) else {
            break;
        };

        stack.truncate(stack.len() - 2);
        stack.push(merged);
        restack(game, stack, x);
    }
}

fn emit(effects: &[Effect]) {
    for effect in effects {
        match serde_json::to_string(effect) {
            Ok(line) => println!("{}", line),
            Err(e) => log::warn!("Could not encode effect: {}", e),
        }
    }
}
