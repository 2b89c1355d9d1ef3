//! Procedural world generation
//!
//! Runner mode emits obstacles on a fixed cadence; jumper mode appends
//! platform rows ahead of the camera. Both prune entities that have left
//! the playfield so a long run keeps a bounded working set.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{GENERATION_LOOKAHEAD, OBSTACLE_RETENTION, ROW_MIN_GAP};
use crate::tuning::{Mode, Tuning};

use super::state::{Collectible, GameState, Obstacle, Platform, Player};

/// Uniform draw that tolerates an empty range
fn uniform(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi <= lo { lo } else { rng.random_range(lo..hi) }
}

/// Emit one obstacle just past the right edge.
pub fn spawn_obstacle(state: &mut GameState) {
    let t = state.tuning;
    let mut rng = state.rng_state.split();
    let size = uniform(&mut rng, t.obstacle_size_min, t.obstacle_size_max);
    let speed = uniform(&mut rng, t.obstacle_speed_min, t.obstacle_speed_max);
    // coin flip static vs oscillating, then a coin flip for the direction
    let osc_dir = if rng.random_bool(0.5) {
        if rng.random_bool(0.5) { 1 } else { -1 }
    } else {
        0
    };
    let base_y = state.stage.y - size - t.floor_margin;
    state.obstacles.push(Obstacle {
        pos: Vec2::new(state.stage.x + size, base_y),
        size,
        speed,
        osc_dir,
        base_y,
    });
    log::debug!("obstacle spawned: size {size:.0} speed {speed:.1} osc {osc_dir}");
}

/// Drop obstacles that have fully left the stage on the left.
pub fn prune_obstacles(state: &mut GameState) {
    state
        .obstacles
        .retain(|ob| ob.pos.x + ob.size > -OBSTACLE_RETENTION);
}

/// Drop platforms more than one screen-height below the bottom edge.
pub fn prune_platforms(state: &mut GameState) {
    let cutoff = state.stage.y * 2.0;
    state.platforms.retain(|p| p.pos.y < cutoff);
}

/// Row shapes the jumper generator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowPattern {
    SingleStatic,
    SingleMoving,
    Pair,
}

fn pick_pattern(rng: &mut Pcg32, t: &Tuning) -> RowPattern {
    let total = t.static_row_weight + t.moving_row_weight + t.pair_row_weight;
    let roll = rng.random_range(0..total);
    if roll < t.static_row_weight {
        RowPattern::SingleStatic
    } else if roll < t.static_row_weight + t.moving_row_weight {
        RowPattern::SingleMoving
    } else {
        RowPattern::Pair
    }
}

/// Append rows until the topmost generated one is past the lookahead
/// margin above the viewport. Called every tick; amortized O(1).
pub fn extend_rows(state: &mut GameState) {
    while state.highest_row_y > -GENERATION_LOOKAHEAD {
        let y = state.highest_row_y - state.tuning.row_spacing;
        spawn_row(state, y);
        state.highest_row_y = y;
    }
}

fn spawn_row(state: &mut GameState, y: f32) {
    let t = state.tuning;
    let mut rng = state.rng_state.split();
    let size = t.platform_size;
    let max_x = (state.stage.x - size.x).max(0.0);

    match pick_pattern(&mut rng, &t) {
        RowPattern::SingleStatic => {
            let x = uniform(&mut rng, 0.0, max_x);
            state.platforms.push(Platform {
                pos: Vec2::new(x, y),
                size,
                vel_x: 0.0,
            });
        }
        RowPattern::SingleMoving => {
            let x = uniform(&mut rng, 0.0, max_x);
            let vel_x = if rng.random_bool(0.5) {
                t.platform_drift_speed
            } else {
                -t.platform_drift_speed
            };
            state.platforms.push(Platform {
                pos: Vec2::new(x, y),
                size,
                vel_x,
            });
        }
        RowPattern::Pair => {
            let (x1, x2) = place_pair(&mut rng, state.stage.x, size.x);
            state.platforms.push(Platform {
                pos: Vec2::new(x1, y),
                size,
                vel_x: 0.0,
            });
            if let Some(x2) = x2 {
                state.platforms.push(Platform {
                    pos: Vec2::new(x2, y),
                    size,
                    vel_x: 0.0,
                });
            }
        }
    }
}

/// Place two same-row platforms with a guaranteed clear gap.
///
/// The second position is drawn from the space left over after carving out
/// the first platform plus the minimum gap on both sides, so
/// `|x1 - x2| >= w + ROW_MIN_GAP` holds whenever a partner fits. A stage
/// too narrow for two platforms degrades to a single (`None` partner).
pub fn place_pair(rng: &mut Pcg32, stage_w: f32, w: f32) -> (f32, Option<f32>) {
    let max_x = (stage_w - w).max(0.0);
    let x1 = uniform(rng, 0.0, max_x);

    let clearance = w + ROW_MIN_GAP;
    let left_len = (x1 - clearance).max(0.0);
    let right_start = x1 + clearance;
    let right_len = (max_x - right_start).max(0.0);
    let total = left_len + right_len;
    if total <= 0.0 {
        log::debug!("no room for a platform pair at width {w:.0}");
        return (x1, None);
    }

    let u = uniform(rng, 0.0, total);
    let x2 = if u < left_len {
        u
    } else {
        right_start + (u - left_len)
    };
    (x1, Some(x2))
}

/// Build the jumper opening scene: a catch platform directly under the
/// spawn point, the player resting on it, the egg in view, and rows up to
/// the lookahead margin.
pub fn seed_initial_world(state: &mut GameState) {
    let t = state.tuning;
    let size = t.platform_size;
    let catch = Platform {
        pos: Vec2::new((state.stage.x - size.x) / 2.0, state.stage.y - 100.0),
        size,
        vel_x: 0.0,
    };

    state.player = Player::new(
        Vec2::new(
            catch.pos.x + (size.x - t.player_size.x) / 2.0,
            catch.pos.y - t.player_size.y,
        ),
        t.player_size,
        false,
    );

    let mut rng = state.rng_state.split();
    state.egg = Collectible {
        pos: Vec2::new(
            uniform(&mut rng, 0.0, (state.stage.x - t.egg_size.x).max(0.0)),
            state.stage.y * 0.25,
        ),
        size: t.egg_size,
        collected: false,
    };

    state.highest_row_y = catch.pos.y;
    state.platforms.push(catch);
    extend_rows(state);
    log::debug!("seeded {} platforms", state.platforms.len());
}

/// Put the egg back into play. Runner mode repositions it near the floor;
/// jumper mode places it strictly above the visible top so it arrives with
/// the scroll.
pub fn respawn_collectible(state: &mut GameState) {
    let t = state.tuning;
    let mut rng = state.rng_state.split();
    match t.mode {
        Mode::Runner => {
            state.egg.pos.x = uniform(&mut rng, state.stage.x * 0.4, state.stage.x * 0.9);
            state.egg.pos.y = state.stage.y - t.floor_margin - t.egg_size.y - 10.0;
        }
        Mode::Jumper => {
            state.egg.pos.x = uniform(&mut rng, 0.0, (state.stage.x - t.egg_size.x).max(0.0));
            state.egg.pos.y = -(t.egg_size.y + uniform(&mut rng, 0.0, state.stage.y * 0.4));
        }
    }
    state.egg.collected = false;
    log::debug!(
        "egg respawned at ({:.0}, {:.0})",
        state.egg.pos.x,
        state.egg.pos.y
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Preset;
    use rand::SeedableRng;

    fn jumper_state(seed: u64) -> GameState {
        GameState::new(seed, Vec2::new(960.0, 540.0), Preset::JumperBasic.tuning())
    }

    #[test]
    fn obstacle_spawn_respects_tuning_ranges() {
        let mut state = GameState::new(5, Vec2::new(960.0, 540.0), Preset::RunnerClassic.tuning());
        for _ in 0..50 {
            spawn_obstacle(&mut state);
        }
        let t = state.tuning;
        for ob in &state.obstacles {
            assert!(ob.size >= t.obstacle_size_min && ob.size < t.obstacle_size_max);
            assert!(ob.speed >= t.obstacle_speed_min && ob.speed < t.obstacle_speed_max);
            assert_eq!(ob.pos.x, state.stage.x + ob.size);
            assert_eq!(ob.pos.y, ob.base_y);
            assert!(matches!(ob.osc_dir, -1 | 0 | 1));
        }
    }

    #[test]
    fn pruning_bounds_the_working_set() {
        let mut state = GameState::new(6, Vec2::new(960.0, 540.0), Preset::RunnerClassic.tuning());
        state.obstacles.push(Obstacle {
            pos: Vec2::new(-500.0, 100.0),
            size: 40.0,
            speed: 3.0,
            osc_dir: 0,
            base_y: 100.0,
        });
        prune_obstacles(&mut state);
        assert!(state.obstacles.is_empty());

        let mut state = jumper_state(7);
        let before = state.platforms.len();
        state.platforms.push(Platform {
            pos: Vec2::new(0.0, state.stage.y * 2.0 + 1.0),
            size: state.tuning.platform_size,
            vel_x: 0.0,
        });
        prune_platforms(&mut state);
        assert_eq!(state.platforms.len(), before);
    }

    #[test]
    fn rows_are_spaced_and_cover_the_lookahead() {
        let state = jumper_state(8);
        assert!(state.highest_row_y <= -GENERATION_LOOKAHEAD);
        let spacing = state.tuning.row_spacing;
        let base = state.stage.y - 100.0;
        for p in &state.platforms {
            // every row sits on the spacing grid below the catch platform
            let steps = (base - p.pos.y) / spacing;
            assert!(
                (steps - steps.round()).abs() < 1e-3,
                "row at {} off the grid",
                p.pos.y
            );
        }
    }

    #[test]
    fn moving_rows_only_when_weighted() {
        let mut t = Preset::JumperBasic.tuning();
        t.moving_row_weight = 0;
        t.pair_row_weight = 0;
        let state = GameState::new(9, Vec2::new(960.0, 540.0), t);
        assert!(state.platforms.iter().all(|p| p.vel_x == 0.0));
    }

    #[test]
    fn respawn_places_ahead_of_the_camera() {
        let mut state = jumper_state(10);
        state.egg.collected = true;
        respawn_collectible(&mut state);
        assert!(!state.egg.collected);
        assert!(state.egg.pos.y <= -state.egg.size.y);
    }

    #[test]
    fn pair_placement_stays_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let (x1, x2) = place_pair(&mut rng, 960.0, 80.0);
            assert!((0.0..=880.0).contains(&x1));
            let x2 = x2.expect("a 960-wide stage fits a pair");
            assert!((0.0..=880.0).contains(&x2));
            assert!((x1 - x2).abs() >= 80.0 + ROW_MIN_GAP);
        }
    }

    #[test]
    fn narrow_stage_degrades_to_single() {
        let mut rng = Pcg32::seed_from_u64(12);
        let (_, x2) = place_pair(&mut rng, 150.0, 80.0);
        assert!(x2.is_none());
    }
}
