//! Per-tick simulation step
//!
//! The orchestrator for one fixed timestep: physics, input, world update,
//! collisions, collectible bookkeeping, deferred events and scoring, in
//! that order. All units are per-tick; the shell converts wall time into
//! ticks through its accumulator.

use crate::consts::SCORE_INTERVAL_TICKS;
use crate::tuning::Mode;

use super::collision::{obstacle_hit, pickup_overlap, platform_landing};
use super::generate;
use super::scroll;
use super::state::{GameEvent, GamePhase, GameState, ScheduledKind};

/// Input snapshot for a single tick, read from the key map at tick start
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the game state by one tick. A no-op outside the Running phase.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    match state.tuning.mode {
        Mode::Runner => tick_runner(state, input),
        Mode::Jumper => tick_jumper(state, input),
    }

    // terminal transition this tick; leave the state frozen as-is
    if state.phase != GamePhase::Running {
        return;
    }

    check_pickup(state);
    run_scheduled(state);

    if state.time_ticks % SCORE_INTERVAL_TICKS == 0 {
        state.score += 1;
    }
}

fn tick_runner(state: &mut GameState, input: &TickInput) {
    let t = state.tuning;

    // jump intent is honored only from the ground
    if input.jump && state.player.grounded {
        state.player.vel_y = -t.jump_force;
        state.player.grounded = false;
        state.events.push(GameEvent::Jumped);
    }

    // position first, then gravity
    if !state.player.grounded {
        state.player.pos.y += state.player.vel_y;
        state.player.vel_y += t.gravity;
    }

    // floor clamp
    let floor_y = state.stage.y - state.player.size().y - t.floor_margin;
    if state.player.pos.y >= floor_y {
        state.player.pos.y = floor_y;
        state.player.vel_y = 0.0;
        state.player.grounded = true;
    }

    apply_horizontal(state, input);

    // obstacles march left; oscillators bob inside their band
    for ob in &mut state.obstacles {
        ob.pos.x -= ob.speed;
        if ob.osc_dir != 0 {
            ob.pos.y += f32::from(ob.osc_dir) * t.osc_step;
            if ob.pos.y > ob.base_y + crate::consts::OSC_AMPLITUDE
                || ob.pos.y < ob.base_y - crate::consts::OSC_AMPLITUDE
            {
                ob.osc_dir = -ob.osc_dir;
            }
        }
    }
    generate::prune_obstacles(state);

    if state.time_ticks >= state.next_spawn_tick {
        generate::spawn_obstacle(state);
        state.next_spawn_tick = state.time_ticks + u64::from(t.spawn_interval_ticks);
    }

    let player_box = state.player.rect();
    let hit = state
        .obstacles
        .iter()
        .any(|ob| obstacle_hit(player_box, ob.rect(), t.policy, t.obstacle_inset));
    if hit {
        game_over(state);
    }
}

fn tick_jumper(state: &mut GameState, input: &TickInput) {
    let t = state.tuning;

    // free fall; platforms are the only support
    state.player.pos.y += state.player.vel_y;
    state.player.vel_y += t.gravity;

    apply_horizontal(state, input);

    // platform drift with edge bounce
    for p in &mut state.platforms {
        if p.vel_x != 0.0 {
            p.pos.x += p.vel_x;
            if p.pos.x <= 0.0 {
                p.pos.x = 0.0;
                p.vel_x = -p.vel_x;
            } else if p.pos.x + p.size.x >= state.stage.x {
                p.pos.x = state.stage.x - p.size.x;
                p.vel_x = -p.vel_x;
            }
        }
    }

    // landing only counts on the way down
    if state.player.vel_y > 0.0 {
        let player_box = state.player.rect();
        let vel_y = state.player.vel_y;
        let caught = state
            .platforms
            .iter()
            .any(|p| platform_landing(player_box, p.rect(), vel_y));
        if caught {
            state.player.vel_y = -t.jump_force * state.player.growth;
            state.events.push(GameEvent::Bounced);
        }
    }

    scroll::recenter(state);
    generate::extend_rows(state);
    generate::prune_platforms(state);

    // an uncollected egg a full screen below the view is unreachable
    if !state.egg.collected && state.egg.pos.y > state.stage.y * 2.0 {
        generate::respawn_collectible(state);
    }

    if state.player.pos.y > state.stage.y + t.fall_margin {
        game_over(state);
    }
}

fn apply_horizontal(state: &mut GameState, input: &TickInput) {
    let t = state.tuning;
    if input.right {
        state.player.pos.x += t.move_speed;
    }
    if input.left {
        state.player.pos.x -= t.move_speed;
    }
    // clamp to the stage, accounting for the grown width
    let max_x = (state.stage.x - state.player.size().x).max(0.0);
    state.player.pos.x = state.player.pos.x.clamp(0.0, max_x);
}

fn check_pickup(state: &mut GameState) {
    if state.egg.collected {
        return;
    }
    if !pickup_overlap(state.player.rect(), state.egg.rect()) {
        return;
    }

    let t = state.tuning;
    state.egg.collected = true;
    state.score += t.egg_bonus;
    state.player.growth *= t.growth_step;
    state.schedule(
        ScheduledKind::RespawnCollectible,
        u64::from(t.egg_respawn_delay_ticks),
    );
    if let Some(reset) = t.growth_reset_ticks {
        state.schedule(ScheduledKind::ResetGrowth, u64::from(reset));
    }
    state.events.push(GameEvent::Collected);
    log::debug!("egg collected, score {}", state.score);
}

fn run_scheduled(state: &mut GameState) {
    let now = state.time_ticks;
    let mut i = 0;
    while i < state.pending.len() {
        if state.pending[i].due_tick <= now {
            let event = state.pending.remove(i);
            match event.kind {
                ScheduledKind::RespawnCollectible => generate::respawn_collectible(state),
                ScheduledKind::ResetGrowth => {
                    state.player.growth = 1.0;
                    log::debug!("growth boost expired");
                }
            }
        } else {
            i += 1;
        }
    }
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::Over;
    state.final_score = state.score;
    state.events.push(GameEvent::GameOver {
        final_score: state.final_score,
    });
    log::info!("run over, final score {}", state.final_score);
}
