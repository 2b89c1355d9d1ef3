//! Data-driven game balance
//!
//! Every constant that ever diverged between shipped variants of the game
//! lives in [`Tuning`]; the variants themselves are the [`Preset`] table.
//! Engine code reads the tuning on the game state and nothing else.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which game the engine is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Side-scrolling dodge: fixed floor, obstacles march in from the right
    Runner,
    /// Vertical endless: bounce up platform rows, camera scrolls the world
    Jumper,
}

/// Obstacle hit-test policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Raw box overlap - generous hits
    Exact,
    /// Obstacle box shrunk before testing - trims grazing collisions
    Inset,
}

/// Complete balance sheet for one variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub mode: Mode,

    // Player
    pub player_size: Vec2,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Jump impulse magnitude (runner: off the floor; jumper: off a platform)
    pub jump_force: f32,
    /// Horizontal units per tick while a direction key is held
    pub move_speed: f32,
    /// Size multiplier applied per collected egg
    pub growth_step: f32,
    /// Ticks until a growth boost wears off (None = permanent)
    pub growth_reset_ticks: Option<u32>,

    // Stage
    /// Gap between the stage bottom and the runner floor line
    pub floor_margin: f32,
    /// How far below the visible bottom a jumper may fall before the run ends
    pub fall_margin: f32,

    // Collision
    pub policy: CollisionPolicy,
    /// Per-side shrink applied under [`CollisionPolicy::Inset`]
    pub obstacle_inset: f32,

    // Obstacles (runner)
    pub spawn_interval_ticks: u32,
    pub obstacle_size_min: f32,
    pub obstacle_size_max: f32,
    pub obstacle_speed_min: f32,
    pub obstacle_speed_max: f32,
    /// Vertical units per tick for oscillating obstacles
    pub osc_step: f32,

    // Collectible
    pub egg_size: Vec2,
    pub egg_bonus: u64,
    /// Ticks between pickup and respawn (0 = immediate repositioning)
    pub egg_respawn_delay_ticks: u32,

    // Platforms (jumper)
    pub platform_size: Vec2,
    /// Vertical distance between generated rows
    pub row_spacing: f32,
    /// Drift speed of moving platforms
    pub platform_drift_speed: f32,
    // Row pattern weights
    pub static_row_weight: u32,
    pub moving_row_weight: u32,
    pub pair_row_weight: u32,
}

/// The shipped variants, oldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    #[default]
    RunnerClassic,
    RunnerTurbo,
    RunnerHardened,
    JumperBasic,
    JumperDrift,
    JumperDeluxe,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::RunnerClassic,
        Preset::RunnerTurbo,
        Preset::RunnerHardened,
        Preset::JumperBasic,
        Preset::JumperDrift,
        Preset::JumperDeluxe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::RunnerClassic => "runner-classic",
            Preset::RunnerTurbo => "runner-turbo",
            Preset::RunnerHardened => "runner-hardened",
            Preset::JumperBasic => "jumper-basic",
            Preset::JumperDrift => "jumper-drift",
            Preset::JumperDeluxe => "jumper-deluxe",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "runner-classic" | "classic" => Some(Preset::RunnerClassic),
            "runner-turbo" | "turbo" => Some(Preset::RunnerTurbo),
            "runner-hardened" | "hardened" => Some(Preset::RunnerHardened),
            "jumper-basic" => Some(Preset::JumperBasic),
            "jumper-drift" | "drift" => Some(Preset::JumperDrift),
            "jumper-deluxe" | "deluxe" => Some(Preset::JumperDeluxe),
            _ => None,
        }
    }

    /// Balance sheet for this variant
    pub fn tuning(&self) -> Tuning {
        let base = runner_base();
        match self {
            Preset::RunnerClassic => base,
            Preset::RunnerTurbo => Tuning {
                spawn_interval_ticks: 114,
                obstacle_speed_min: 4.0,
                obstacle_speed_max: 6.0,
                ..base
            },
            Preset::RunnerHardened => Tuning {
                spawn_interval_ticks: 108,
                obstacle_speed_min: 5.0,
                obstacle_speed_max: 8.0,
                policy: CollisionPolicy::Inset,
                egg_respawn_delay_ticks: 180,
                ..base
            },
            Preset::JumperBasic => jumper_base(),
            Preset::JumperDrift => Tuning {
                policy: CollisionPolicy::Inset,
                platform_drift_speed: 2.5,
                static_row_weight: 4,
                moving_row_weight: 4,
                pair_row_weight: 2,
                ..jumper_base()
            },
            Preset::JumperDeluxe => Tuning {
                policy: CollisionPolicy::Inset,
                platform_drift_speed: 3.0,
                static_row_weight: 3,
                moving_row_weight: 4,
                pair_row_weight: 3,
                growth_reset_ticks: Some(600),
                ..jumper_base()
            },
        }
    }
}

fn runner_base() -> Tuning {
    Tuning {
        mode: Mode::Runner,
        player_size: Vec2::new(100.0, 100.0),
        gravity: 0.6,
        jump_force: 14.0,
        move_speed: 5.0,
        growth_step: 1.2,
        growth_reset_ticks: None,
        floor_margin: 50.0,
        fall_margin: 60.0,
        policy: CollisionPolicy::Exact,
        obstacle_inset: 10.0,
        spawn_interval_ticks: 120,
        obstacle_size_min: 30.0,
        obstacle_size_max: 70.0,
        obstacle_speed_min: 3.0,
        obstacle_speed_max: 5.0,
        osc_step: 1.0,
        egg_size: Vec2::new(50.0, 60.0),
        egg_bonus: 10,
        egg_respawn_delay_ticks: 0,
        platform_size: Vec2::new(80.0, 14.0),
        row_spacing: 90.0,
        platform_drift_speed: 2.0,
        static_row_weight: 6,
        moving_row_weight: 2,
        pair_row_weight: 2,
    }
}

fn jumper_base() -> Tuning {
    Tuning {
        mode: Mode::Jumper,
        player_size: Vec2::new(60.0, 60.0),
        gravity: 0.5,
        jump_force: 12.0,
        static_row_weight: 6,
        moving_row_weight: 2,
        pair_row_weight: 2,
        ..runner_base()
    }
}
