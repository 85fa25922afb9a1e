//! World dimensions
//!
//! Passed at construction; the simulation never reads process-wide state.
//! Dimension sanity (positive, tall enough for at least one generation step)
//! is the caller's responsibility.

use serde::{Deserialize, Serialize};

/// Dimensions of one play session's world, in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            // 15 screens of 20 units
            height: 300.0,
        }
    }
}

impl WorldConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
