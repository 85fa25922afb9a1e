//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (one stream for generation, one for the crumble roll)
//! - Stable scan order (collection order)
//! - No rendering or platform dependencies, no I/O during ticks
//!
//! The single mutation entry point is [`World::update`]; everything else is
//! construction and read access.

pub mod geom;
pub mod level;
pub mod state;
pub mod tick;

pub use geom::{Aabb, overlaps};
pub use level::{LevelLayout, generate_level};
pub use state::{
    Coin, Flyer, Goal, NullListener, Platform, PlatformKind, PlatformState, Player, PlayerState,
    Spring, World, WorldListener, WorldPhase, WorldSnapshot,
};
