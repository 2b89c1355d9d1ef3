//! Egg Dash entry point
//!
//! Wires the deterministic simulation to the browser: canvas surface,
//! keyboard state, the asset rendezvous, audio cues and the
//! animation-frame loop. Native builds run a short headless session
//! instead, mostly useful for profiling and log inspection.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, KeyboardEvent,
    };

    use egg_dash::assets::{AssetId, AssetSet};
    use egg_dash::audio::{AudioManager, SoundEffect};
    use egg_dash::consts::*;
    use egg_dash::render::{self, Surface};
    use egg_dash::settings::Settings;
    use egg_dash::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use egg_dash::tuning::Preset;

    /// Canvas 2D implementation of the draw surface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        images: [HtmlImageElement; REQUIRED_ASSETS],
    }

    impl Surface for CanvasSurface {
        fn clear(&mut self, x: f32, y: f32, w: f32, h: f32) {
            self.ctx
                .clear_rect(f64::from(x), f64::from(y), f64::from(w), f64::from(h));
        }

        fn draw_image(&mut self, id: AssetId, x: f32, y: f32, w: f32, h: f32) {
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &self.images[id.index()],
                f64::from(x),
                f64::from(y),
                f64::from(w),
                f64::from(h),
            );
        }

        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
            self.ctx.set_fill_style_str(color);
            self.ctx
                .fill_rect(f64::from(x), f64::from(y), f64::from(w), f64::from(h));
        }

        fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str) {
            self.ctx.set_font(font);
            self.ctx.set_fill_style_str(color);
            let _ = self.ctx.fill_text(text, f64::from(x), f64::from(y));
        }
    }

    /// Game instance holding all shell-side state
    struct Game {
        state: GameState,
        settings: Settings,
        audio: AudioManager,
        surface: CanvasSurface,
        assets: AssetSet,
        /// Key code -> pressed, mutated by the listeners, snapshotted per tick
        keys: HashMap<String, bool>,
        accumulator: f32,
        last_time: f64,
        /// A frame is already requested; prevents double-scheduling
        frame_pending: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn pressed(&self, code: &str) -> bool {
            self.keys.get(code).copied().unwrap_or(false)
        }

        /// Snapshot the key map into this tick's input
        fn snapshot_input(&self) -> TickInput {
            TickInput {
                left: self.pressed("ArrowLeft"),
                right: self.pressed("ArrowRight"),
                jump: self.pressed("Space"),
            }
        }

        /// Run simulation ticks for the elapsed wall time
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let input = self.snapshot_input();
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// React to what the tick produced
        fn drain_events(&mut self, document: &Document) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Jumped | GameEvent::Bounced => self.audio.play(SoundEffect::Jump),
                    GameEvent::Collected => self.audio.play(SoundEffect::Pickup),
                    GameEvent::GameOver { final_score } => {
                        self.audio.play(SoundEffect::GameOver);
                        self.audio.set_music_playing(false);
                        show_game_over(document, final_score);
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            render::render(&mut self.surface, &self.state, &self.assets);
            if self.settings.show_fps {
                let text = format!("{} fps", self.fps);
                let x = self.state.stage.x - 90.0;
                self.surface.fill_text(&text, x, 30.0, "16px Arial", "#555");
            }
        }
    }

    /// Toggle one of the full-screen overlay panels by id
    fn set_overlay(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "overlay" } else { "overlay hidden" });
        }
    }

    fn hide_loading(document: &Document) {
        if let Some(el) = document.get_element_by_id("loading") {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    fn show_game_over(document: &Document, final_score: u64) {
        if let Some(el) = document.get_element_by_id("final-score") {
            el.set_text_content(Some(&final_score.to_string()));
        }
        set_overlay(document, "game-over", true);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Egg Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Match the backing store to the displayed size
        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context fetch failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        // Variant comes from the page, defaulting to the classic runner
        let preset = canvas
            .get_attribute("data-preset")
            .and_then(|s| Preset::from_str(&s))
            .unwrap_or_default();
        log::info!("Preset: {}", preset.as_str());

        let settings = Settings::load();
        let audio = AudioManager::new(&settings);

        let images: [HtmlImageElement; REQUIRED_ASSETS] = AssetId::ALL.map(|id| {
            let img = HtmlImageElement::new().expect("image element");
            img.set_src(id.file_name());
            img
        });

        let seed = js_sys::Date::now() as u64;
        let stage = glam::Vec2::new(width as f32, height as f32);
        let state = GameState::new(seed, stage, preset.tuning());
        log::info!("Game initialized with seed: {seed}");

        let game = Rc::new(RefCell::new(Game {
            state,
            settings,
            audio,
            surface: CanvasSurface {
                ctx,
                images: images.clone(),
            },
            assets: AssetSet::new(),
            keys: HashMap::new(),
            accumulator: 0.0,
            last_time: 0.0,
            frame_pending: false,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        setup_asset_rendezvous(&window, &document, &images, game.clone());
        setup_input_handlers(&document, game.clone());
        setup_buttons(&document, game.clone());

        set_overlay(&document, "start-screen", true);
        set_overlay(&document, "game-over", false);

        log::info!("Egg Dash ready");
    }

    /// Counted rendezvous over the required images, with a deadline so a
    /// failed load can never hang the session.
    fn setup_asset_rendezvous(
        window: &web_sys::Window,
        document: &Document,
        images: &[HtmlImageElement; REQUIRED_ASSETS],
        game: Rc<RefCell<Game>>,
    ) {
        for (id, img) in AssetId::ALL.into_iter().zip(images.iter()) {
            {
                let game = game.clone();
                let document = document.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    let mut g = game.borrow_mut();
                    g.assets.mark_ready(id);
                    if g.assets.all_ready() {
                        log::info!("All assets ready");
                        hide_loading(&document);
                    }
                });
                let _ = img
                    .add_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            {
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    log::warn!("Failed to load {}", id.file_name());
                });
                let _ = img
                    .add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Deadline: stop waiting and let the renderer use placeholders
        {
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let mut g = game.borrow_mut();
                if !g.assets.all_ready() {
                    g.assets.expire_deadline();
                    hide_loading(&document);
                }
            });
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ASSET_DEADLINE_MS,
            );
            closure.forget();
        }
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.insert(event.code(), true);
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.insert(event.code(), false);
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Start: gated on the asset rendezvous
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.assets.may_start() {
                    log::warn!(
                        "Start requested with {}/{} assets ready, waiting",
                        g.assets.ready_count(),
                        REQUIRED_ASSETS
                    );
                    return;
                }
                g.state.start();
                g.audio.resume();
                g.audio.set_music_playing(true);
                g.last_time = 0.0;
                set_overlay(&document, "start-screen", false);
                drop(g);
                ensure_frame(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart: full reset back to the start screen
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().state.restart(seed);
                set_overlay(&document, "game-over", false);
                set_overlay(&document, "start-screen", true);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Request the next animation frame unless one is already pending
    fn ensure_frame(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.frame_pending {
                return;
            }
            g.frame_pending = true;
        }
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");

        let over = {
            let mut g = game.borrow_mut();
            g.frame_pending = false;

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.drain_events(&document);
            g.render();
            g.state.phase == GamePhase::Over
        };

        // The loop halts the moment the run ends; restart re-arms it
        if !over {
            ensure_frame(game);
        } else {
            log::info!("Loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use egg_dash::sim::{GamePhase, GameState, TickInput, tick};
    use egg_dash::tuning::Preset;

    env_logger::init();
    log::info!("Egg Dash (native) starting...");

    // No native window; run a scripted headless session instead. The
    // browser build is the real game - run with `trunk serve`.
    let preset = std::env::args()
        .nth(1)
        .and_then(|s| Preset::from_str(&s))
        .unwrap_or_default();
    log::info!("Preset: {}", preset.as_str());

    let mut state = GameState::new(42, glam::Vec2::new(960.0, 540.0), preset.tuning());
    state.start();

    let input = TickInput {
        jump: true,
        ..TickInput::default()
    };
    let mut ticks = 0u32;
    while state.phase == GamePhase::Running && ticks < 3600 {
        tick(&mut state, &input);
        state.drain_events();
        ticks += 1;
    }

    println!(
        "headless session: {} ticks, score {}, phase {:?}",
        ticks, state.score, state.phase
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
