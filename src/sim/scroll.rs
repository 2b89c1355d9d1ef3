//! Camera recentering for jumper mode
//!
//! The player never climbs past the viewport midline; the world slides
//! down instead. The accumulated shift is the authoritative distance
//! traveled and drives forward generation and collectible placement.

use super::state::GameState;

/// Recenter the player on the viewport midline if they have risen above
/// it, shifting every world entity down by the same delta. Returns the
/// shift applied (0 when the player is at or below the midline).
pub fn recenter(state: &mut GameState) -> f32 {
    let midline = state.stage.y / 2.0;
    if state.player.pos.y >= midline {
        return 0.0;
    }

    let diff = midline - state.player.pos.y;
    state.player.pos.y = midline;
    state.scroll_offset += diff;
    for platform in &mut state.platforms {
        platform.pos.y += diff;
    }
    state.egg.pos.y += diff;
    state.highest_row_y += diff;
    diff
}
