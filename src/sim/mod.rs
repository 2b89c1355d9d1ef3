//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick = one 60 Hz frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The shell owns the clock and the draw surface; it feeds input snapshots
//! into [`tick`] and drains [`GameEvent`]s back out.

pub mod collision;
pub mod generate;
pub mod rect;
pub mod scroll;
pub mod state;
pub mod tick;

pub use collision::{obstacle_hit, pickup_overlap, platform_landing};
pub use rect::Rect;
pub use state::{
    Collectible, GameEvent, GamePhase, GameState, Obstacle, Platform, Player, ScheduledEvent,
    ScheduledKind,
};
pub use tick::{TickInput, tick};
