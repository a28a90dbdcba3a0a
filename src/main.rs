//! Turbo Tap entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, Document, MouseEvent, TouchEvent};

    use turbo_tap::platform::{self, DomCache, FxLayer};
    use turbo_tap::sim::{GameEvent, GameState, PointerSignal, tap, tick};
    use turbo_tap::ui::HudSnapshot;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        dom: DomCache,
        fx: FxLayer,
        document: Document,
        /// Last HUD written to the page
        hud: Option<HudSnapshot>,
        hud_dirty: bool,
    }

    impl Game {
        fn on_pointer(&mut self, signal: &PointerSignal) {
            let event = signal.normalize(platform::performance_now());
            let events = tap(&mut self.state, &event);
            self.handle_events(&events);
        }

        fn frame(&mut self, time: f64) {
            let events = tick(&mut self.state, time);
            self.handle_events(&events);

            let transform = self.state.frame_transform();
            if let Err(e) = self.dom.apply_frame(&transform) {
                log::warn!("Sprite update failed: {:?}", e);
            }
            if let Err(e) = self.fx.sync(&self.document, &self.dom, &mut self.state) {
                log::warn!("Effect sync failed: {:?}", e);
            }
            self.update_hud();
        }

        fn handle_events(&mut self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::ComboReset => log::debug!("Combo dropped"),
                    GameEvent::CooldownStarted => log::debug!("Cooldown started"),
                    GameEvent::CooldownEnded => log::debug!("Cooldown ended"),
                    _ => {}
                }
                self.hud_dirty = true;
            }
        }

        fn update_hud(&mut self) {
            if !self.hud_dirty && self.hud.is_some() {
                return;
            }
            self.hud_dirty = false;

            let hud = HudSnapshot::from_ledger(&self.state.ledger);
            if self.hud.as_ref() == Some(&hud) {
                return;
            }
            if let Err(e) = self.dom.apply_hud(&hud, self.hud.as_ref()) {
                log::warn!("HUD update failed: {:?}", e);
            }
            self.hud = Some(hud);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Turbo Tap starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let dom = DomCache::lookup(&document)?;

        let tuning = dom.load_tuning();
        let settings = dom.load_settings(&window);
        dom.init_sprite(&tuning)?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::with_tuning(seed, tuning, settings),
            dom,
            fx: FxLayer::new(),
            document,
            hud: None,
            hud_dirty: true,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone())?;
        request_animation_frame(game);

        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let sprite = game.borrow().dom.sprite.clone();

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let signal = PointerSignal::Pointer {
                    x: event.client_x() as f32,
                    y: event.client_y() as f32,
                };
                game.borrow_mut().on_pointer(&signal);
            });
            sprite.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start, non-passive so the synthesized mouse event can be cancelled
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let touches = event.touches();
                let points = (0..touches.length())
                    .filter_map(|i| touches.get(i))
                    .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
                    .collect();
                let signal = PointerSignal::Touch { points };
                if signal.suppresses_default() && event.cancelable() {
                    event.prevent_default();
                }
                game.borrow_mut().on_pointer(&signal);
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            sprite.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, frame loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Turbo Tap (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    run_demo(42);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Tap a burst for four seconds, then let everything settle
#[cfg(not(target_arch = "wasm32"))]
fn run_demo(seed: u64) {
    use turbo_tap::sim::{GameEvent, GameState, TapEvent, tap, tick};
    use turbo_tap::ui::format_number;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FRAMES: u32 = 60 * 10;
    const TAP_FRAMES: u32 = 60 * 4;
    const TAP_EVERY: u32 = 6;

    let mut state = GameState::new(seed);
    let origin = (state.tuning.frame_width / 2.0, state.tuning.frame_height / 2.0);
    let mut despawned = 0usize;

    for frame in 0..FRAMES {
        let now = f64::from(frame) * FRAME_MS;

        if frame < TAP_FRAMES && frame % TAP_EVERY == 0 {
            for event in tap(&mut state, &TapEvent::new(origin.0, origin.1, now)) {
                if let GameEvent::LevelUp { level } = event {
                    println!("  level up -> {}", level);
                }
            }
        }

        for event in tick(&mut state, now) {
            if event == GameEvent::ComboReset {
                println!("  combo reset at {:.0}ms", now);
            }
        }
        let transform = state.frame_transform();
        // No elements to remove here, but the queue still has to be emptied
        despawned += state.effects.drain_despawned().len();

        if frame % 60 == 0 {
            log::info!(
                "t={:>5.0}ms combo={:>2} intensity={:.2} frame={} particles={} effects={}",
                now,
                state.combo(),
                state.motion.intensity,
                transform.frame_index,
                state.effects.active_particles(),
                state.effects.len()
            );
        }
    }

    let progress = state.ledger.progress();
    println!(
        "Gold {} | Level {} | XP {}/{} | Max combo {} | Effects retired {}",
        format_number(progress.gold),
        progress.level,
        progress.xp,
        progress.xp_to_next,
        progress.max_combo,
        despawned
    );
}
