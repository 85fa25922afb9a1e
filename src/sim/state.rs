//! Entity kinds and world state
//!
//! Each entity is a tagged struct carrying only the fields it needs: position
//! and box for static kinds, plus velocity for moving kinds, plus a discrete
//! state and elapsed-time counter for stateful kinds. Shared geometry lives in
//! [`super::geom`]; the tick protocol that mutates all of this lives in
//! [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use super::level::generate_level;
use crate::config::WorldConfig;
use crate::consts::*;

/// Player animation/behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Moving upward
    Jumping,
    /// Moving downward
    Falling,
    /// Touched a flyer; control and collisions are disabled
    Hit,
}

/// The controlled character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub state: PlayerState,
    /// Seconds since the last state transition
    pub state_time: f32,
    pub bounds: Aabb,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            vel: Vec2::ZERO,
            state: PlayerState::Falling,
            state_time: 0.0,
            bounds: Aabb::new(pos, PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }

    /// Integrate one timestep: gravity, motion, horizontal wrap, and the
    /// velocity-driven Jumping/Falling transitions
    pub fn update(&mut self, delta_time: f32, world_width: f32) {
        self.vel.y += GRAVITY * delta_time;
        self.pos += self.vel * delta_time;
        // Exiting one side re-enters the other
        self.pos.x = self.pos.x.rem_euclid(world_width);
        self.bounds.recenter(self.pos);

        self.state_time += delta_time;
        if self.vel.y > 0.0 && self.state != PlayerState::Hit && self.state != PlayerState::Jumping
        {
            self.state = PlayerState::Jumping;
            self.state_time = 0.0;
        }
        if self.vel.y < 0.0 && self.state != PlayerState::Hit && self.state != PlayerState::Falling
        {
            self.state = PlayerState::Falling;
            self.state_time = 0.0;
        }
    }

    /// Landing response: full jump impulse
    pub fn land(&mut self) {
        self.vel.y = PLAYER_JUMP_VELOCITY;
        self.state = PlayerState::Jumping;
        self.state_time = 0.0;
    }

    /// Spring response: amplified jump impulse
    pub fn boost(&mut self) {
        self.vel.y = PLAYER_JUMP_VELOCITY * SPRING_BOOST;
        self.state = PlayerState::Jumping;
        self.state_time = 0.0;
    }

    /// Flyer contact response: dead stop, then fall out of the world
    pub fn hit(&mut self) {
        self.vel = Vec2::ZERO;
        self.state = PlayerState::Hit;
        self.state_time = 0.0;
    }
}

/// Whether a platform stands still or patrols horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Static,
    Moving,
}

/// Platform lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformState {
    Normal,
    /// Will be removed once `state_time` exceeds [`PLATFORM_CRUMBLE_TIME`]
    Crumbling,
}

/// A platform the player can land on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub kind: PlatformKind,
    pub pos: Vec2,
    /// Horizontal patrol velocity; nonzero only for moving platforms
    pub vel_x: f32,
    pub state: PlatformState,
    /// Seconds in the current state (also paces the crumble animation)
    pub state_time: f32,
    pub bounds: Aabb,
}

impl Platform {
    pub fn new(kind: PlatformKind, x: f32, y: f32) -> Self {
        let pos = Vec2::new(x, y);
        let vel_x = match kind {
            PlatformKind::Moving => PLATFORM_VELOCITY,
            PlatformKind::Static => 0.0,
        };
        Self {
            kind,
            pos,
            vel_x,
            state: PlatformState::Normal,
            state_time: 0.0,
            bounds: Aabb::new(pos, PLATFORM_WIDTH, PLATFORM_HEIGHT),
        }
    }

    /// Integrate patrol motion, bouncing off either world edge
    pub fn update(&mut self, delta_time: f32, world_width: f32) {
        if self.kind == PlatformKind::Moving {
            self.pos.x += self.vel_x * delta_time;

            if self.pos.x < PLATFORM_WIDTH / 2.0 {
                self.vel_x = -self.vel_x;
                self.pos.x = PLATFORM_WIDTH / 2.0;
            }
            if self.pos.x > world_width - PLATFORM_WIDTH / 2.0 {
                self.vel_x = -self.vel_x;
                self.pos.x = world_width - PLATFORM_WIDTH / 2.0;
            }
            self.bounds.recenter(self.pos);
        }

        self.state_time += delta_time;
    }

    /// Begin disintegrating; the platform stops moving and is removed after
    /// [`PLATFORM_CRUMBLE_TIME`]
    pub fn crumble(&mut self) {
        self.state = PlatformState::Crumbling;
        self.state_time = 0.0;
        self.vel_x = 0.0;
    }
}

/// A reusable one-shot vertical boost; never removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spring {
    pub pos: Vec2,
    pub bounds: Aabb,
}

impl Spring {
    pub fn new(x: f32, y: f32) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            bounds: Aabb::new(pos, SPRING_WIDTH, SPRING_HEIGHT),
        }
    }
}

/// Hostile patroller; contact ends the player's run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flyer {
    pub pos: Vec2,
    pub vel_x: f32,
    /// Seconds alive, paces the wing animation
    pub state_time: f32,
    pub bounds: Aabb,
}

impl Flyer {
    pub fn new(x: f32, y: f32) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            vel_x: FLYER_VELOCITY,
            state_time: 0.0,
            bounds: Aabb::new(pos, FLYER_WIDTH, FLYER_HEIGHT),
        }
    }

    /// Patrol horizontally, reversing at either world edge
    pub fn update(&mut self, delta_time: f32, world_width: f32) {
        self.pos.x += self.vel_x * delta_time;

        if self.pos.x < FLYER_WIDTH / 2.0 {
            self.pos.x = FLYER_WIDTH / 2.0;
            self.vel_x = FLYER_VELOCITY;
        }
        if self.pos.x > world_width - FLYER_WIDTH / 2.0 {
            self.pos.x = world_width - FLYER_WIDTH / 2.0;
            self.vel_x = -FLYER_VELOCITY;
        }

        self.bounds.recenter(self.pos);
        self.state_time += delta_time;
    }
}

/// A collectible; removed the instant the player overlaps it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    /// Seconds alive, paces the spin animation
    pub state_time: f32,
    pub bounds: Aabb,
}

impl Coin {
    pub fn new(x: f32, y: f32) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            state_time: 0.0,
            bounds: Aabb::new(pos, COIN_WIDTH, COIN_HEIGHT),
        }
    }

    pub fn update(&mut self, delta_time: f32) {
        self.state_time += delta_time;
    }
}

/// The terminal structure above the topmost platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Vec2,
    pub bounds: Aabb,
}

impl Goal {
    pub fn new(x: f32, y: f32) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            bounds: Aabb::new(pos, GOAL_WIDTH, GOAL_HEIGHT),
        }
    }
}

/// Top-level session state
///
/// `LevelComplete` and `GameOver` are terminal: once either is reached no
/// further entity mutation occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldPhase {
    Running,
    /// The player reached the goal
    LevelComplete,
    /// The player fell too far below the height watermark
    GameOver,
}

/// Synchronous notifications delivered during a tick, in collision order
///
/// Implemented by the audio collaborator. Implementations must not call back
/// into the world.
pub trait WorldListener {
    /// Player landed on a platform
    fn jump(&mut self);
    /// Player bounced off a spring
    fn high_jump(&mut self);
    /// Player touched a flyer
    fn hit(&mut self);
    /// Player collected a coin
    fn coin(&mut self);
}

/// Listener that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl WorldListener for NullListener {
    fn jump(&mut self) {}
    fn high_jump(&mut self) {}
    fn hit(&mut self) {}
    fn coin(&mut self) {}
}

/// The authoritative state of one play session
///
/// Owns every entity exclusively; external collaborators observe through the
/// read accessors or [`World::snapshot`].
pub struct World {
    pub(crate) listener: Box<dyn WorldListener>,
    pub(crate) config: WorldConfig,
    /// Tick-time randomness (the crumble roll); a separate stream from the
    /// generation RNG so level layout depends only on the seed
    pub(crate) rng: Pcg32,
    pub(crate) player: Player,
    pub(crate) platforms: Vec<Platform>,
    pub(crate) springs: Vec<Spring>,
    pub(crate) flyers: Vec<Flyer>,
    pub(crate) coins: Vec<Coin>,
    pub(crate) goal: Goal,
    pub(crate) score: u32,
    pub(crate) height_so_far: f32,
    pub(crate) phase: WorldPhase,
}

impl World {
    /// Generate a level for `seed` and place the player at the bottom center
    pub fn new(listener: Box<dyn WorldListener>, config: WorldConfig, seed: u64) -> Self {
        let mut gen_rng = Pcg32::seed_from_u64(seed);
        let level = generate_level(&config, &mut gen_rng);

        Self {
            listener,
            player: Player::new(config.width / 2.0, 1.0),
            platforms: level.platforms,
            springs: level.springs,
            flyers: level.flyers,
            coins: level.coins,
            goal: level.goal,
            rng: Pcg32::seed_from_u64(seed.wrapping_mul(2654435761).wrapping_add(1)),
            score: 0,
            height_so_far: 0.0,
            phase: WorldPhase::Running,
            config,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn flyers(&self) -> &[Flyer] {
        &self.flyers
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Highest point the player has reached this session
    pub fn height_so_far(&self) -> f32 {
        self.height_so_far
    }

    pub fn phase(&self) -> WorldPhase {
        self.phase
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Read-only copy of everything a renderer or score collaborator needs
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            player: self.player.clone(),
            platforms: self.platforms.clone(),
            springs: self.springs.clone(),
            flyers: self.flyers.clone(),
            coins: self.coins.clone(),
            goal: self.goal.clone(),
            score: self.score,
            height_so_far: self.height_so_far,
            phase: self.phase,
        }
    }
}

/// Serializable per-tick view of the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub springs: Vec<Spring>,
    pub flyers: Vec<Flyer>,
    pub coins: Vec<Coin>,
    pub goal: Goal,
    pub score: u32,
    pub height_so_far: f32,
    pub phase: WorldPhase,
}
