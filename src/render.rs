//! Frame drawing over an abstract surface
//!
//! The simulation never draws. This module translates a [`GameState`] into
//! calls on the [`Surface`] capability; the browser shell backs it with a
//! canvas 2D context, tests with a recording stub. Any image that has not
//! reported ready is drawn as a flat placeholder instead.

use crate::assets::{AssetId, AssetSet};
use crate::sim::GameState;
use crate::tuning::Mode;

/// The draw operations the game needs; nothing else.
pub trait Surface {
    fn clear(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn draw_image(&mut self, id: AssetId, x: f32, y: f32, w: f32, h: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str);
}

const SKY_COLOR: &str = "#eef";
const OBSTACLE_COLOR: &str = "#e00";
const PLATFORM_COLOR: &str = "#4a7c2f";
const PLAYER_FALLBACK_COLOR: &str = "#333";
const EGG_FALLBACK_COLOR: &str = "#f5deb3";
const SCORE_FONT: &str = "20px Arial";
const SCORE_COLOR: &str = "black";

/// Draw one frame of the current state.
pub fn render(surface: &mut dyn Surface, state: &GameState, assets: &AssetSet) {
    let (w, h) = (state.stage.x, state.stage.y);
    surface.clear(0.0, 0.0, w, h);

    if assets.is_ready(AssetId::Background) {
        surface.draw_image(AssetId::Background, 0.0, 0.0, w, h);
    } else {
        surface.fill_rect(0.0, 0.0, w, h, SKY_COLOR);
    }

    match state.tuning.mode {
        Mode::Runner => {
            for ob in &state.obstacles {
                surface.fill_rect(ob.pos.x, ob.pos.y, ob.size, ob.size, OBSTACLE_COLOR);
            }
        }
        Mode::Jumper => {
            for p in &state.platforms {
                surface.fill_rect(p.pos.x, p.pos.y, p.size.x, p.size.y, PLATFORM_COLOR);
            }
        }
    }

    if !state.egg.collected {
        let egg = &state.egg;
        if assets.is_ready(AssetId::Egg) {
            surface.draw_image(AssetId::Egg, egg.pos.x, egg.pos.y, egg.size.x, egg.size.y);
        } else {
            surface.fill_rect(egg.pos.x, egg.pos.y, egg.size.x, egg.size.y, EGG_FALLBACK_COLOR);
        }
    }

    let player = &state.player;
    let size = player.size();
    if assets.is_ready(AssetId::Player) {
        surface.draw_image(AssetId::Player, player.pos.x, player.pos.y, size.x, size.y);
    } else {
        surface.fill_rect(
            player.pos.x,
            player.pos.y,
            size.x,
            size.y,
            PLAYER_FALLBACK_COLOR,
        );
    }

    surface.fill_text(
        &format!("Score: {}", state.score),
        20.0,
        30.0,
        SCORE_FONT,
        SCORE_COLOR,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Preset;
    use glam::Vec2;

    /// Records draw calls instead of drawing
    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        images: Vec<AssetId>,
        rects: Vec<String>,
        texts: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
            self.clears += 1;
        }
        fn draw_image(&mut self, id: AssetId, _x: f32, _y: f32, _w: f32, _h: f32) {
            self.images.push(id);
        }
        fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, color: &str) {
            self.rects.push(color.to_string());
        }
        fn fill_text(&mut self, text: &str, _x: f32, _y: f32, _font: &str, _color: &str) {
            self.texts.push(text.to_string());
        }
    }

    fn ready_assets() -> AssetSet {
        let mut assets = AssetSet::new();
        for id in AssetId::ALL {
            assets.mark_ready(id);
        }
        assets
    }

    #[test]
    fn frame_clears_then_draws_sprites_and_score() {
        let state = GameState::new(1, Vec2::new(960.0, 540.0), Preset::RunnerClassic.tuning());
        let mut surface = RecordingSurface::default();
        render(&mut surface, &state, &ready_assets());

        assert_eq!(surface.clears, 1);
        assert_eq!(
            surface.images,
            vec![AssetId::Background, AssetId::Egg, AssetId::Player]
        );
        assert_eq!(surface.texts, vec!["Score: 0".to_string()]);
    }

    #[test]
    fn missing_assets_fall_back_to_rects() {
        let state = GameState::new(2, Vec2::new(960.0, 540.0), Preset::RunnerClassic.tuning());
        let mut surface = RecordingSurface::default();
        render(&mut surface, &state, &AssetSet::new());

        assert!(surface.images.is_empty());
        // background, egg and player placeholders
        assert_eq!(surface.rects.len(), 3);
    }

    #[test]
    fn collected_egg_is_not_drawn() {
        let mut state = GameState::new(3, Vec2::new(960.0, 540.0), Preset::RunnerClassic.tuning());
        state.egg.collected = true;
        let mut surface = RecordingSurface::default();
        render(&mut surface, &state, &ready_assets());
        assert_eq!(surface.images, vec![AssetId::Background, AssetId::Player]);
    }

    #[test]
    fn jumper_draws_platforms() {
        let state = GameState::new(4, Vec2::new(960.0, 540.0), Preset::JumperBasic.tuning());
        let mut surface = RecordingSurface::default();
        render(&mut surface, &state, &ready_assets());
        assert_eq!(surface.rects.len(), state.platforms.len());
    }
}
