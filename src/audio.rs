//! Audio cues via the Web Audio API
//!
//! Sound effects are procedurally generated oscillators - no files needed.
//! Background music comes from an optional `<audio id="music">` element in
//! the page. Every path tolerates denial by the host autoplay policy: a
//! blocked context or rejected play() degrades to silence, never failure.

use wasm_bindgen::JsCast;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground or caught a platform
    Jump,
    /// Egg collected
    Pickup,
    /// Run ended
    GameOver,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music: Option<HtmlAudioElement>,
    master_volume: f32,
    sfx_volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context; the game plays on without it
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - sound effects disabled");
        }

        let music = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("music"))
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        if let Some(el) = &music {
            el.set_loop(true);
            el.set_volume(f64::from(settings.master_volume * settings.music_volume));
        } else {
            log::info!("No #music element in page - music disabled");
        }

        Self {
            ctx,
            music,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
        }
    }

    /// Resume the audio context (browsers require a user gesture first)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Start or stop the looping background track. A rejected play()
    /// promise (autoplay restriction) is deliberately ignored.
    pub fn set_music_playing(&self, playing: bool) {
        let Some(music) = &self.music else { return };
        if playing {
            let _ = music.play();
        } else {
            let _ = music.pause();
            music.set_current_time(0.0);
        }
    }

    fn effective_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    /// Play a sound effect, fire-and-forget
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => self.play_jump(ctx, vol),
            SoundEffect::Pickup => self.play_pickup(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    /// Create an oscillator wired through a gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Quick upward square chirp
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 280.0, OscillatorType::Square) else {
            return;
        };
        let now = ctx.current_time();
        let _ = osc.frequency().exponential_ramp_to_value_at_time(560.0, now + 0.1);
        let _ = gain.gain().set_value_at_time(0.2 * vol, now);
        let _ = gain.gain().exponential_ramp_to_value_at_time(0.001, now + 0.15);
        let _ = osc.start();
        let _ = osc.stop_with_when(now + 0.15);
    }

    /// Two-note sine ding
    fn play_pickup(&self, ctx: &AudioContext, vol: f32) {
        let now = ctx.current_time();
        for (i, freq) in [660.0, 990.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let start = now + i as f64 * 0.08;
            let _ = gain.gain().set_value_at_time(0.25 * vol, start);
            let _ = gain.gain().exponential_ramp_to_value_at_time(0.001, start + 0.2);
            let _ = osc.start_with_when(start);
            let _ = osc.stop_with_when(start + 0.2);
        }
    }

    /// Long descending sawtooth
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Sawtooth) else {
            return;
        };
        let now = ctx.current_time();
        let _ = osc.frequency().exponential_ramp_to_value_at_time(80.0, now + 0.8);
        let _ = gain.gain().set_value_at_time(0.3 * vol, now);
        let _ = gain.gain().exponential_ramp_to_value_at_time(0.001, now + 0.9);
        let _ = osc.start();
        let _ = osc.stop_with_when(now + 0.9);
    }
}
