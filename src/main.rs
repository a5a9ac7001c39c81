//! Gravity Garden entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use gravity_garden::sim::GameEvent;

/// Log the events worth announcing; per-frame noise stays at debug
fn log_event(event: &GameEvent) {
    match event {
        GameEvent::TierUp { to, .. } => log::info!("Tier {} reached!", to),
        GameEvent::AchievementUnlocked { title, .. } => log::info!("Achievement: {}", title),
        GameEvent::MissionStarted { title, .. } => log::info!("New mission: {}", title),
        GameEvent::MissionComplete { title, reward, .. } => {
            log::info!("Mission complete: {} (+{})", title, reward)
        }
        GameEvent::BuildingPlaced { kind, .. } => log::info!("Built {}", kind.as_str()),
        GameEvent::BuildFailed(e) => log::info!("Can't build: {}", e),
        GameEvent::OxygenDepleted => log::warn!("Oxygen depleted"),
        other => log::debug!("{:?}", other),
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

    use gravity_garden::consts::*;
    use gravity_garden::platform::InputState;
    use gravity_garden::sim::{GameEvent, GamePhase, GameState, tick};
    use gravity_garden::{Leaderboard, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        settings: Settings,
        leaderboard: Leaderboard,
        last_time: f64,
        /// Canvas scale, driven by the wheel
        zoom: f32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut state = GameState::new(seed);
            state.max_particles = settings.max_particles();
            Self {
                state,
                input: InputState::new(),
                settings,
                leaderboard: Leaderboard::load(),
                last_time: 0.0,
                zoom: 1.0,
            }
        }

        /// Run one simulation step and handle its events
        fn update(&mut self, dt: f32) {
            let input = self.input.sample();
            tick(&mut self.state, &input, dt);

            self.zoom = self.settings.apply_wheel(self.zoom, self.input.take_wheel());

            for event in self.state.take_events() {
                super::log_event(&event);
                if let GameEvent::GameOver { .. } = event {
                    self.record_run();
                }
            }
        }

        fn record_run(&mut self) {
            let date = String::from(js_sys::Date::new_0().to_iso_string());
            let date = date.get(..10).unwrap_or(date.as_str()).to_string();
            let entry = self.state.leaderboard_entry("Player", &date);
            if let Some(rank) = self.leaderboard.add_entry(entry) {
                log::info!("New leaderboard rank: #{}", rank);
                if let Err(e) = self.leaderboard.save() {
                    log::warn!("Leaderboard not saved: {}", e);
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let hud = self.state.hud();
            let set = |selector: &str, text: &str| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(text));
                }
            };
            set("#hud-mass .hud-value", &format!("{:.1}", hud.mass));
            set("#hud-tier .hud-value", &hud.tier.to_string());
            set("#hud-score .hud-value", &hud.score.to_string());
            set("#hud-mission .hud-value", hud.mission.unwrap_or("-"));
            set("#hud-oxygen .hud-value", &format!("{:.0}", self.state.ledger.oxygen()));
            set(
                "#hud-build .hud-value",
                hud.build_mode.map(|k| k.as_str()).unwrap_or(""),
            );

            if let Some(canvas) = document.get_element_by_id("canvas") {
                let style = format!("transform: scale({:.2})", self.zoom);
                let _ = canvas.set_attribute("style", &style);
            }

            let show = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };
            show("menu", hud.phase == GamePhase::Menu);
            show("pause-menu", hud.phase == GamePhase::Paused);
            show("game-over", hud.phase == GamePhase::GameOver);
            if hud.phase == GamePhase::GameOver {
                set("#final-score", &hud.score.to_string());
                set("#final-tier", &hud.tier.to_string());
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Gravity Garden starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: Option<HtmlCanvasElement> = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok());
        let Some(canvas) = canvas else {
            log::error!("No canvas element");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, &canvas, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        request_animation_frame(game);
        log::info!("Gravity Garden running!");
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .input
                    .pointer_move(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.pointer_down(event.button().max(0) as usize);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.pointer_up(event.button().max(0) as usize);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.click(event.button().max(0) as usize);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                event.prevent_default();
                game.borrow_mut().input.wheel(event.delta_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.state.toggle_pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside): held keys would otherwise stick
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.input.release_all();
                if g.state.phase == GamePhase::Playing {
                    g.state.toggle_pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                NOMINAL_DT
            };
            g.last_time = time;

            g.update(dt.min(MAX_FRAME_DT));
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gravity Garden (native) starting...");
    log::info!("Native mode runs a headless session - use `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => gravity_garden::Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                gravity_garden::Tuning::default()
            }),
            Err(e) => {
                log::warn!("Can't read {}: {}", path, e);
                gravity_garden::Tuning::default()
            }
        },
        None => gravity_garden::Tuning::default(),
    };

    headless_session(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted two-minute run: circle the origin, grab and recycle now and
/// then, plant when affordable. Logs the outcome and records it.
#[cfg(not(target_arch = "wasm32"))]
fn headless_session(tuning: gravity_garden::Tuning) {
    use glam::Vec2;
    use gravity_garden::consts::*;
    use gravity_garden::sim::{BuildingKind, GamePhase, GameState, TickInput, tick};
    use gravity_garden::{Leaderboard, Settings};

    let seed = 0x5eed_u64;
    let settings = Settings::load();
    let mut state = GameState::with_tuning(seed, tuning);
    state.max_particles = settings.max_particles();

    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        NOMINAL_DT,
    );

    let frames = (120.0 / NOMINAL_DT) as u32;
    for frame in 0..frames {
        if state.phase != GamePhase::Playing {
            break;
        }
        let t = frame as f32 * NOMINAL_DT;
        let input = TickInput {
            movement: Vec2::new((t * 0.3).cos(), (t * 0.3).sin()),
            boost: frame % 600 < 60,
            grab: frame % 300 == 150,
            recycle: state.progression.mass() > 40.0,
            select_building: (frame % 900 == 0).then_some(BuildingKind::Tree),
            place: frame % 900 == 1,
            ..Default::default()
        };
        tick(&mut state, &input, NOMINAL_DT);
        for event in state.take_events() {
            log_event(&event);
        }
    }

    tick(
        &mut state,
        &TickInput {
            quit: true,
            ..Default::default()
        },
        NOMINAL_DT,
    );
    state.take_events().iter().for_each(log_event);

    let hud = state.hud();
    log::info!(
        "Session over: score {} mass {:.1} tier {} achievements {} buildings {}",
        hud.score,
        hud.mass,
        hud.tier,
        hud.achievements_unlocked,
        hud.buildings
    );

    let mut board = Leaderboard::load();
    if let Some(rank) = board.add_entry(state.leaderboard_entry("Headless", "native")) {
        log::info!("Leaderboard rank #{}", rank);
        if let Err(e) = board.save() {
            log::warn!("Leaderboard not saved: {}", e);
        }
    }
}
