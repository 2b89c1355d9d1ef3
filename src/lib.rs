//! Egg Dash - a gravity-and-eggs 2D runner/jumper mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, world generation)
//! - `render`: Draw-surface capability and per-frame drawing
//! - `assets`: Image readiness rendezvous with a no-hang deadline
//! - `tuning`: Data-driven game balance (six shipped presets)

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Preset, Tuning};

/// Game configuration constants (preset-independent)
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ticks between time-based score increments (one second of play)
    pub const SCORE_INTERVAL_TICKS: u64 = 60;

    /// Obstacle oscillation bound around its spawn anchor
    pub const OSC_AMPLITUDE: f32 = 40.0;
    /// Extra clearance required between same-row platforms, beyond one width
    pub const ROW_MIN_GAP: f32 = 20.0;
    /// Platform rows are generated this far above the visible top edge
    pub const GENERATION_LOOKAHEAD: f32 = 300.0;
    /// How far past the left edge a runner obstacle is kept alive
    pub const OBSTACLE_RETENTION: f32 = 100.0;

    /// Images required before the first tick may run
    pub const REQUIRED_ASSETS: usize = 3;
    /// Asset rendezvous deadline before the placeholder fallback kicks in (ms)
    pub const ASSET_DEADLINE_MS: i32 = 10_000;
}
