//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here; the tick orchestrator and
//! the generators operate on one owned [`GameState`] value per session.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::generate;
use super::rect::Rect;
use crate::tuning::{Mode, Tuning};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-start: no simulation runs
    Idle,
    /// Simulation ticking, terminal checks active
    Running,
    /// Run ended; state frozen, final score latched
    Over,
}

/// The player sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Un-grown size; the effective size is `base_size * growth`
    pub base_size: Vec2,
    /// Egg-fed size multiplier, never below 1.0
    pub growth: f32,
    pub vel_y: f32,
    /// Floor contact (runner mode only; jumper support is platform contact)
    pub grounded: bool,
}

impl Player {
    pub fn new(pos: Vec2, base_size: Vec2, grounded: bool) -> Self {
        Self {
            pos,
            base_size,
            growth: 1.0,
            vel_y: 0.0,
            grounded,
        }
    }

    /// Effective size after growth
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.base_size * self.growth
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size())
    }
}

/// A square hazard marching in from the right (runner mode)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: f32,
    /// Leftward units per tick
    pub speed: f32,
    /// -1 / 0 / +1; non-zero obstacles bob around `base_y`
    pub osc_dir: i8,
    pub base_y: f32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// A landable ledge (jumper mode)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal drift; bounces off the stage edges. 0 = static.
    pub vel_x: f32,
}

impl Platform {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// The egg power-up. Exactly one exists per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
}

impl Collectible {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Deferred one-shot mutations, keyed by a tick deadline instead of a host
/// timer so a session reset cancels them wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledKind {
    RespawnCollectible,
    ResetGrowth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub due_tick: u64,
    pub kind: ScheduledKind,
}

/// Outward-facing things that happened during a tick; drained by the shell
/// to drive audio cues and the game-over overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Player left the floor (runner)
    Jumped,
    /// Player caught a platform (jumper)
    Bounced,
    /// Egg picked up
    Collected,
    /// Terminal transition; the run is over
    GameOver { final_score: u64 },
}

/// Deterministic RNG handle. Splitting advances the stored seed, so every
/// draw site gets a fresh generator while the whole session stays
/// reproducible from the initial seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn split(&mut self) -> Pcg32 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        self.seed = rng.random();
        rng
    }
}

/// Complete per-session game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Balance sheet this session runs under
    pub tuning: Tuning,
    /// Stage dimensions in surface units
    pub stage: Vec2,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    /// Snapshot taken at the moment the run ended
    pub final_score: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub platforms: Vec<Platform>,
    pub egg: Collectible,
    /// Cumulative upward world shift (jumper); authoritative travel distance
    pub scroll_offset: f32,
    /// Topmost generated row, in current screen coordinates (jumper)
    pub highest_row_y: f32,
    /// Next obstacle emission deadline (runner)
    pub next_spawn_tick: u64,
    /// Pending deferred mutations
    pub pending: Vec<ScheduledEvent>,
    /// Events of the current tick, drained by the shell
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session in the Idle phase
    pub fn new(seed: u64, stage: Vec2, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            tuning,
            stage,
            phase: GamePhase::Idle,
            time_ticks: 0,
            score: 0,
            final_score: 0,
            player: Player::new(Vec2::ZERO, tuning.player_size, false),
            obstacles: Vec::new(),
            platforms: Vec::new(),
            egg: Collectible {
                pos: Vec2::ZERO,
                size: tuning.egg_size,
                collected: false,
            },
            scroll_offset: 0.0,
            highest_row_y: stage.y,
            next_spawn_tick: u64::from(tuning.spawn_interval_ticks),
            pending: Vec::new(),
            events: Vec::new(),
        };

        match tuning.mode {
            Mode::Runner => {
                let floor_y = stage.y - tuning.player_size.y - tuning.floor_margin;
                state.player = Player::new(
                    Vec2::new(stage.x * 0.1, floor_y),
                    tuning.player_size,
                    true,
                );
                state.egg.pos = Vec2::new(
                    stage.x * 0.7,
                    stage.y - tuning.floor_margin - tuning.egg_size.y - 10.0,
                );
            }
            Mode::Jumper => {
                generate::seed_initial_world(&mut state);
            }
        }

        state
    }

    /// Idle -> Running. A no-op in any other phase; the shell gates this on
    /// the asset rendezvous.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Running;
            log::info!("session started (seed {})", self.seed);
        }
    }

    /// Full reset back to Idle with a new seed. Nothing carries over:
    /// entities, score and pending deferred events are all rebuilt.
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(seed, self.stage, self.tuning);
        log::info!("session reset (seed {seed})");
    }

    /// Queue a deferred mutation, replacing any pending one of the same
    /// kind (they are one-shot; the freshest deadline wins).
    pub fn schedule(&mut self, kind: ScheduledKind, delay_ticks: u64) {
        self.pending.retain(|e| e.kind != kind);
        self.pending.push(ScheduledEvent {
            due_tick: self.time_ticks + delay_ticks,
            kind,
        });
    }

    /// Hand the tick's events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Preset;

    fn stage() -> Vec2 {
        Vec2::new(960.0, 540.0)
    }

    #[test]
    fn runner_session_starts_grounded_on_the_floor() {
        let state = GameState::new(1, stage(), Preset::RunnerClassic.tuning());
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.player.grounded);
        let floor_y = stage().y - state.player.size().y - state.tuning.floor_margin;
        assert_eq!(state.player.pos.y, floor_y);
        assert!(!state.egg.collected);
    }

    #[test]
    fn jumper_session_has_a_catch_platform_and_lookahead_rows() {
        let state = GameState::new(2, stage(), Preset::JumperBasic.tuning());
        assert!(!state.platforms.is_empty());
        // rows generated up to the lookahead margin above the viewport
        assert!(state.highest_row_y <= -crate::consts::GENERATION_LOOKAHEAD);
        // one platform directly below the spawn point
        let p = &state.platforms[0];
        let player = &state.player;
        assert_eq!(player.pos.y + player.size().y, p.pos.y);
    }

    #[test]
    fn growth_scales_size() {
        let mut player = Player::new(Vec2::ZERO, Vec2::new(100.0, 100.0), true);
        player.growth = 1.44;
        assert_eq!(player.size(), Vec2::new(144.0, 144.0));
        assert!(player.growth >= 1.0);
    }

    #[test]
    fn start_and_restart_transitions() {
        let mut state = GameState::new(3, stage(), Preset::RunnerClassic.tuning());
        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        // start is Idle-only
        state.phase = GamePhase::Over;
        state.start();
        assert_eq!(state.phase, GamePhase::Over);

        state.score = 42;
        state.schedule(ScheduledKind::ResetGrowth, 10);
        state.restart(99);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.seed, 99);
        assert!(state.pending.is_empty());
    }

    #[test]
    fn schedule_replaces_same_kind() {
        let mut state = GameState::new(4, stage(), Preset::JumperDeluxe.tuning());
        state.schedule(ScheduledKind::ResetGrowth, 10);
        state.schedule(ScheduledKind::ResetGrowth, 20);
        assert_eq!(state.pending.len(), 1);
        assert_eq!(state.pending[0].due_tick, 20);
    }

    #[test]
    fn rng_split_is_reproducible() {
        let mut a = RngState::new(7);
        let mut b = RngState::new(7);
        let mut r1 = a.split();
        let mut r2 = b.split();
        assert_eq!(r1.random::<u64>(), r2.random::<u64>());
        assert_eq!(a.seed, b.seed);
        assert_ne!(a.seed, 7);
    }
}
