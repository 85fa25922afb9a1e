//! Procedural level generation
//!
//! One call per session: walk a vertical cursor from the floor to the top of
//! the world, dropping a platform at every step with optional attachments,
//! then cap the climb with the goal. Fully deterministic for a given seed;
//! the RNG is consumed here and never touched again during ticks.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Coin, Flyer, Goal, Platform, PlatformKind, Spring};
use crate::config::WorldConfig;
use crate::consts::*;

/// The complete initial entity layout for a session
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub platforms: Vec<Platform>,
    pub springs: Vec<Spring>,
    pub flyers: Vec<Flyer>,
    pub coins: Vec<Coin>,
    pub goal: Goal,
}

/// Generate the full layout for the given world dimensions
///
/// Every platform is reachable by a single normal jump: the cursor advance is
/// bounded by the analytic jump apex `v² / (2g)`, minus a random fraction for
/// difficulty variance. Platform x is sampled so the box never leaves
/// `[0, width]`. Springs only appear on static platforms (a patrolling
/// platform would carry the spring out from under its boost), flyers only
/// above one-third of the climb.
pub fn generate_level(config: &WorldConfig, rng: &mut Pcg32) -> LevelLayout {
    let mut platforms = Vec::new();
    let mut springs = Vec::new();
    let mut flyers = Vec::new();
    let mut coins = Vec::new();

    let max_jump_height = PLAYER_JUMP_VELOCITY * PLAYER_JUMP_VELOCITY / (2.0 * -GRAVITY);
    let mut y = PLATFORM_HEIGHT / 2.0;

    while y < config.height - config.width / 2.0 {
        let kind = if rng.random::<f32>() > 1.0 - P_MOVING {
            PlatformKind::Moving
        } else {
            PlatformKind::Static
        };
        let x = rng.random::<f32>() * (config.width - PLATFORM_WIDTH) + PLATFORM_WIDTH / 2.0;
        platforms.push(Platform::new(kind, x, y));

        if rng.random::<f32>() > 1.0 - P_SPRING && kind != PlatformKind::Moving {
            springs.push(Spring::new(
                x,
                y + PLATFORM_HEIGHT / 2.0 + SPRING_HEIGHT / 2.0,
            ));
        }

        if y > config.height / 3.0 && rng.random::<f32>() > 1.0 - P_FLYER {
            flyers.push(Flyer::new(
                x + rng.random::<f32>(),
                y + FLYER_HEIGHT + rng.random::<f32>() * 2.0,
            ));
        }

        if rng.random::<f32>() > 1.0 - P_COIN {
            coins.push(Coin::new(
                x + rng.random::<f32>(),
                y + COIN_HEIGHT + rng.random::<f32>() * 3.0,
            ));
        }

        y += max_jump_height - 0.5;
        y -= rng.random::<f32>() * (max_jump_height / 3.0);
    }

    let goal = Goal::new(config.width / 2.0, y);
    log::info!(
        "Generated level: {} platforms, {} springs, {} flyers, {} coins, goal at {:.1}",
        platforms.len(),
        springs.len(),
        flyers.len(),
        coins.len(),
        y
    );

    LevelLayout {
        platforms,
        springs,
        flyers,
        coins,
        goal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn layout_for(seed: u64) -> LevelLayout {
        let config = WorldConfig::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        generate_level(&config, &mut rng)
    }

    #[test]
    fn test_platforms_stay_inside_world() {
        let config = WorldConfig::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let level = generate_level(&config, &mut rng);

        assert!(!level.platforms.is_empty());
        for platform in &level.platforms {
            assert!(platform.pos.x - PLATFORM_WIDTH / 2.0 >= 0.0);
            assert!(platform.pos.x + PLATFORM_WIDTH / 2.0 <= config.width);
        }
    }

    #[test]
    fn test_goal_above_topmost_platform() {
        let config = WorldConfig::default();
        let level = layout_for(42);

        let top = level
            .platforms
            .iter()
            .map(|p| p.pos.y)
            .fold(f32::MIN, f32::max);
        assert!(level.goal.pos.y > top);
        assert_eq!(level.goal.pos.x, config.width / 2.0);
    }

    #[test]
    fn test_platform_gaps_are_jumpable() {
        let level = layout_for(7);
        let max_jump_height = PLAYER_JUMP_VELOCITY * PLAYER_JUMP_VELOCITY / (2.0 * -GRAVITY);

        for pair in level.platforms.windows(2) {
            let gap = pair[1].pos.y - pair[0].pos.y;
            assert!(gap > 0.0, "platforms are placed bottom-up");
            assert!(gap <= max_jump_height);
        }
    }

    #[test]
    fn test_springs_sit_on_static_platforms() {
        for seed in [1u64, 42, 1234] {
            let level = layout_for(seed);
            for spring in &level.springs {
                let host = level.platforms.iter().find(|p| {
                    p.pos.x == spring.pos.x
                        && (spring.pos.y - p.pos.y - PLATFORM_HEIGHT / 2.0 - SPRING_HEIGHT / 2.0)
                            .abs()
                            < 1e-5
                });
                let host = host.expect("every spring is centered above a platform");
                assert_eq!(host.kind, PlatformKind::Static);
            }
        }
    }

    #[test]
    fn test_flyers_only_on_upper_two_thirds() {
        let config = WorldConfig::default();
        for seed in [1u64, 42, 1234] {
            let level = layout_for(seed);
            for flyer in &level.flyers {
                assert!(flyer.pos.y > config.height / 3.0);
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = layout_for(99);
        let b = layout_for(99);
        assert_eq!(a.platforms.len(), b.platforms.len());
        for (pa, pb) in a.platforms.iter().zip(&b.platforms) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.kind, pb.kind);
        }
        assert_eq!(a.goal.pos, b.goal.pos);
        assert_eq!(a.coins.len(), b.coins.len());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = layout_for(1);
        let b = layout_for(2);
        let same = a.platforms.len() == b.platforms.len()
            && a.platforms
                .iter()
                .zip(&b.platforms)
                .all(|(pa, pb)| pa.pos == pb.pos);
        assert!(!same);
    }
}
