//! Per-tick update protocol
//!
//! [`World::update`] advances one tick through a fixed sequence of phases:
//! floor guard, lateral control, player integration, platform/flyer/coin
//! updates, collision resolution, fall check. The phase order is a
//! correctness contract: collision responses read the freshly integrated
//! bounds, and the fall check runs after the goal check so reaching the goal
//! wins a same-tick tie.
//!
//! Listener notifications fire synchronously, in scan order, before `update`
//! returns.

use rand::Rng;

use super::geom::overlaps;
use super::state::{PlatformState, PlayerState, World, WorldPhase};
use crate::consts::*;

impl World {
    /// Advance the simulation by `delta_time` seconds
    ///
    /// `lateral_input` is the horizontal control axis in [-1, 1]; the player's
    /// horizontal velocity is set to its negation at full move speed. Callers
    /// are expected to clamp long frame gaps before calling. Once the phase is
    /// terminal this is a no-op.
    pub fn update(&mut self, delta_time: f32, lateral_input: f32) {
        if self.phase != WorldPhase::Running {
            return;
        }

        self.update_player(delta_time, lateral_input);
        self.update_platforms(delta_time);
        self.update_flyers(delta_time);
        self.update_coins(delta_time);
        if self.player.state != PlayerState::Hit {
            self.check_collisions();
        }
        self.check_game_over();
    }

    fn update_player(&mut self, delta_time: f32, lateral_input: f32) {
        // Floor guard: never fall through the bottom of the world
        if self.player.state != PlayerState::Hit && self.player.pos.y <= FLOOR_HEIGHT {
            self.player.land();
        }
        if self.player.state != PlayerState::Hit {
            self.player.vel.x = -lateral_input * PLAYER_MOVE_VELOCITY;
        }
        self.player.update(delta_time, self.config.width);
        self.height_so_far = self.height_so_far.max(self.player.pos.y);
    }

    fn update_platforms(&mut self, delta_time: f32) {
        for platform in &mut self.platforms {
            platform.update(delta_time, self.config.width);
        }
        self.platforms.retain(|p| {
            p.state != PlatformState::Crumbling || p.state_time <= PLATFORM_CRUMBLE_TIME
        });
    }

    fn update_flyers(&mut self, delta_time: f32) {
        for flyer in &mut self.flyers {
            flyer.update(delta_time, self.config.width);
        }
    }

    fn update_coins(&mut self, delta_time: f32) {
        for coin in &mut self.coins {
            coin.update(delta_time);
        }
    }

    fn check_collisions(&mut self) {
        self.check_platform_collisions();
        self.check_flyer_collisions();
        self.check_coin_collisions();
        self.check_spring_collisions();
        self.check_goal_collision();
    }

    /// Land on the first overlapping platform below the player
    ///
    /// Only a descending (or hovering) player can land. At most one platform
    /// reacts per tick, and landing crumbles it half the time.
    fn check_platform_collisions(&mut self) {
        if self.player.vel.y > 0.0 {
            return;
        }

        for platform in &mut self.platforms {
            if self.player.pos.y > platform.pos.y
                && overlaps(&self.player.bounds, &platform.bounds)
            {
                self.player.land();
                self.listener.jump();
                if self.rng.random::<f32>() > 0.5 {
                    platform.crumble();
                }
                break;
            }
        }
    }

    /// Any flyer contact knocks the player out; the response is idempotent,
    /// so several simultaneous overlaps converge on the same state
    fn check_flyer_collisions(&mut self) {
        for flyer in &self.flyers {
            if overlaps(&flyer.bounds, &self.player.bounds) {
                self.player.hit();
                self.listener.hit();
            }
        }
    }

    fn check_coin_collisions(&mut self) {
        let mut i = 0;
        while i < self.coins.len() {
            if overlaps(&self.player.bounds, &self.coins[i].bounds) {
                self.coins.remove(i);
                self.listener.coin();
                self.score += COIN_SCORE;
                // Stay on this index: the next coin just shifted into it
            } else {
                i += 1;
            }
        }
    }

    /// Bounce off the first overlapping spring below a descending player
    fn check_spring_collisions(&mut self) {
        if self.player.vel.y > 0.0 {
            return;
        }

        for spring in &self.springs {
            if self.player.pos.y > spring.pos.y && overlaps(&self.player.bounds, &spring.bounds) {
                self.player.boost();
                self.listener.high_jump();
                break;
            }
        }
    }

    fn check_goal_collision(&mut self) {
        if overlaps(&self.goal.bounds, &self.player.bounds) {
            log::debug!("goal reached at height {:.1}", self.player.pos.y);
            self.phase = WorldPhase::LevelComplete;
        }
    }

    /// End the session once the player drops too far below the watermark
    ///
    /// Only transitions out of `Running`: a goal contact earlier in the same
    /// tick stands.
    fn check_game_over(&mut self) {
        if self.phase != WorldPhase::Running {
            return;
        }
        if self.height_so_far - FALL_TOLERANCE > self.player.pos.y {
            log::debug!(
                "fell from {:.1} to {:.1}, game over",
                self.height_so_far,
                self.player.pos.y
            );
            self.phase = WorldPhase::GameOver;
        }
    }
}
