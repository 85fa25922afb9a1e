//! Updraft demo driver
//!
//! Runs one headless session: generates a level from a seed, drives the world
//! at a fixed timestep with a small autopilot, and prints the final snapshot
//! as JSON. Real frontends replace this loop with their own render/input
//! driver and clamp frame gaps to [`MAX_FRAME_DT`] before ticking.

use updraft::consts::*;
use updraft::sim::{World, WorldListener, WorldPhase};
use updraft::{HighScores, WorldConfig};

/// Listener that traces each notification; a frontend would play sounds here
struct LogListener;

impl WorldListener for LogListener {
    fn jump(&mut self) {
        log::debug!("event: jump");
    }
    fn high_jump(&mut self) {
        log::debug!("event: high-jump");
    }
    fn hit(&mut self) {
        log::debug!("event: hit");
    }
    fn coin(&mut self) {
        log::debug!("event: coin");
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    log::info!("Starting session with seed {seed}");

    let mut world = World::new(Box::new(LogListener), WorldConfig::default(), seed);

    // Two simulated minutes, or until the session ends
    let max_ticks = (120.0 / SIM_DT) as u32;
    let mut ticks = 0;
    while world.phase() == WorldPhase::Running && ticks < max_ticks {
        world.update(SIM_DT, autopilot(&world));
        ticks += 1;
    }

    let outcome = match world.phase() {
        WorldPhase::Running => "still running",
        WorldPhase::LevelComplete => "reached the goal",
        WorldPhase::GameOver => "game over",
    };
    log::info!(
        "Session {} after {:.1}s: score {}, height {:.1}",
        outcome,
        ticks as f32 * SIM_DT,
        world.score(),
        world.height_so_far()
    );

    let mut scores = HighScores::new();
    if let Some(rank) = scores.add_score(world.score(), world.height_so_far()) {
        log::info!("Score ranks #{rank} this run");
    }

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Snapshot serialization failed: {err}"),
    }
}

/// Steer toward the next platform above the player (or the goal once the
/// platforms run out), taking the short way around the wrapped axis
fn autopilot(world: &World) -> f32 {
    let player = world.player();
    let width = world.config().width;

    let target_x = world
        .platforms()
        .iter()
        .filter(|p| p.pos.y > player.pos.y)
        .min_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.pos.x)
        .unwrap_or(world.goal().pos.x);

    let mut dx = target_x - player.pos.x;
    if dx > width / 2.0 {
        dx -= width;
    }
    if dx < -width / 2.0 {
        dx += width;
    }

    // The world negates lateral input, so push with the opposite sign
    (-dx).clamp(-1.0, 1.0)
}
