//! Chrono Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop. The wasm
//! driver owns the fixed-timestep accumulator, keyboard input, the DOM HUD,
//! and hands a JSON render snapshot to the page each frame. The native build
//! runs a headless attract-mode demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use chrono_dash::consts::*;
    use chrono_dash::highscores::{HighScores, format_date};
    use chrono_dash::settings::Settings;
    use chrono_dash::sim::{GameEvent, GamePhase, GameState, RenderSnapshot, TickInput, tick};
    use chrono_dash::tuning::Tuning;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tuning: Tuning,
        settings: Settings,
        highscores: HighScores,
        accumulator: f64,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Attract-mode timer (Date.now() clock)
        last_input_time: f64,
        // Rank earned by the run on the game-over screen
        final_rank: Option<usize>,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings, highscores: HighScores) -> Self {
            Self {
                state: GameState::new(seed, tuning),
                tuning,
                settings,
                highscores,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_input_time: js_sys::Date::now(),
                final_rank: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt_ms: f64, time: f64) {
            let dt_ms = dt_ms.min(100.0);
            self.accumulator += dt_ms;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
                let input = self.input;
                let events = tick(&mut self.state, &input, SIM_DT_MS);
                self.accumulator -= SIM_DT_MS;
                substeps += 1;

                // Clear one-shot inputs after processing
                let idle = self.input.idle_mode;
                self.input = TickInput::default();
                self.input.idle_mode = idle;

                for event in events {
                    self.on_event(event);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn on_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::RunStarted => log::info!("Run started"),
                GameEvent::LevelUp { level } => log::info!("Level {} reached", level + 1),
                GameEvent::PowerActivated { power } => {
                    log::debug!("{} activated", power.as_str())
                }
                GameEvent::PowerDenied { power } => log::debug!("{} on cooldown", power.as_str()),
                GameEvent::GameOver {
                    score,
                    level,
                    hazard_id,
                } => {
                    log::info!(
                        "Run over: {} points at level {} (hazard #{})",
                        score,
                        level + 1,
                        hazard_id
                    );
                    // demo runs stay off the leaderboard
                    if !self.input.idle_mode {
                        self.final_rank = self.highscores.add_score(score, level, js_sys::Date::now());
                        if self.final_rank.is_some() {
                            self.highscores.save();
                        }
                    }
                    self.refresh_scoreboard();
                }
                _ => {}
            }
        }

        /// Start a fresh run
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed, self.tuning);
            self.accumulator = 0.0;
            self.input = TickInput::default();
            self.final_rank = None;
        }

        /// Kick off the attract-mode demo after enough input silence
        fn maybe_start_demo(&mut self, now: f64) {
            if !self.settings.idle_demo || self.input.idle_mode {
                return;
            }
            if now - self.last_input_time < self.settings.idle_delay_ms {
                return;
            }
            match self.state.phase {
                GamePhase::Ready => {
                    self.input.idle_mode = true;
                    log::info!("Attract mode started");
                }
                GamePhase::GameOver => {
                    self.restart(now as u64);
                    self.input.idle_mode = true;
                    log::info!("Attract mode started");
                }
                _ => {}
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, snap: &RenderSnapshot) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&snap.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&(snap.level + 1).to_string()));
            }

            if let Some(el) = document.query_selector("#hud-time .hud-value").ok().flatten() {
                let secs = (snap.elapsed_ms / 1000.0) as u64;
                el.set_text_content(Some(&format!("{}:{:02}", secs / 60, secs % 60)));
            }

            // Time-distortion readout doubles as the field's status lamp
            if let Some(el) = document.query_selector("#hud-state .hud-value").ok().flatten() {
                el.set_text_content(Some(snap.time_state.as_str()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("hud-stats") {
                if self.settings.show_stats {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) =
                        document.query_selector("#hud-stats .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&format!(
                            "{}/{}/{}",
                            snap.stats.spawned, snap.stats.passed, snap.stats.retired
                        )));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Ability slots: drain while active, refill while cooling
            for status in &snap.powers {
                let id = format!("power-{}", status.power.as_str().to_lowercase());
                if let Some(el) = document.get_element_by_id(&id) {
                    let class = if status.active {
                        "power-slot active"
                    } else if status.ready {
                        "power-slot ready"
                    } else {
                        "power-slot cooling"
                    };
                    let _ = el.set_attribute("class", class);
                }
                if let Some(fill) = document
                    .query_selector(&format!("#{} .power-fill", id))
                    .ok()
                    .flatten()
                {
                    let frac = if status.active {
                        status.active_fraction
                    } else {
                        1.0 - status.cooldown_fraction
                    };
                    let _ = fill.set_attribute("style", &format!("width: {:.0}%", frac * 100.0));
                }
            }

            // Show/hide the phase overlays
            if let Some(el) = document.get_element_by_id("ready-prompt") {
                if snap.phase == GamePhase::Ready && !self.input.idle_mode {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("pause-menu") {
                if snap.phase == GamePhase::Paused {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("demo-badge") {
                if self.input.idle_mode {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if snap.phase == GamePhase::GameOver {
                    let class = if self.settings.effective_screen_flash() {
                        "flash"
                    } else {
                        ""
                    };
                    let _ = el.set_attribute("class", class);
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&snap.score.to_string()));
                    }
                    if let Some(level_el) = document.get_element_by_id("final-level") {
                        level_el.set_text_content(Some(&(snap.level + 1).to_string()));
                    }
                    if let Some(rank_el) = document.get_element_by_id("final-rank") {
                        let text = match self.final_rank {
                            Some(rank) => format!("#{}", rank),
                            None => "-".to_string(),
                        };
                        rank_el.set_text_content(Some(&text));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Rebuild the leaderboard panel from the stored entries
        fn refresh_scoreboard(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let Some(list) = document.get_element_by_id("highscore-list") else {
                return;
            };
            list.set_inner_html("");
            for entry in &self.highscores.entries {
                if let Ok(li) = document.create_element("li") {
                    li.set_text_content(Some(&format!(
                        "{} pts | Lv {} | {}",
                        entry.score,
                        entry.level + 1,
                        format_date(entry.timestamp)
                    )));
                    let _ = list.append_child(&li);
                }
            }
        }
    }

    /// Hand the frame snapshot to the page's renderer hook, if installed
    fn push_snapshot(snap: &RenderSnapshot) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(hook) = js_sys::Reflect::get(&window, &JsValue::from_str("__chronoDashRender"))
        else {
            return;
        };
        let Ok(hook) = hook.dyn_into::<js_sys::Function>() else {
            return;
        };
        let json = snap.to_json();
        let _ = hook.call1(&JsValue::NULL, &JsValue::from_str(&json));
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Chrono Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let tuning = Tuning::load();
        let settings = Settings::load();
        let highscores = HighScores::load();

        if settings.high_contrast {
            if let Some(body) = document.body() {
                let _ = body.set_attribute("class", "high-contrast");
            }
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, settings, highscores)));
        game.borrow().refresh_scoreboard();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_pause_menu(game.clone());
        setup_auto_pause(game.clone());

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Chrono Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            let key = event.key();
            let now = js_sys::Date::now();

            // A real key press takes the controls back from the demo
            if g.input.idle_mode && key.as_str() != "i" && key.as_str() != "I" {
                g.input.idle_mode = false;
                g.restart(now as u64);
                log::info!("Attract mode interrupted");
            }
            g.last_input_time = now;

            let mut handled = true;
            match key.as_str() {
                "ArrowLeft" | "a" | "A" => g.input.move_left = true,
                "ArrowRight" | "d" | "D" => g.input.move_right = true,
                "ArrowUp" | "w" | "W" | " " => g.input.jump = true,
                "ArrowDown" | "s" | "S" => g.input.slide = true,
                "1" => g.input.freeze = true,
                "2" => g.input.slow = true,
                "3" => g.input.speed = true,
                "Escape" => g.input.pause = true,
                "Enter" => {
                    if g.state.phase == GamePhase::GameOver {
                        g.restart(now as u64);
                        log::info!("Restarted with seed: {}", now as u64);
                    }
                }
                "i" | "I" => {
                    g.input.idle_mode = !g.input.idle_mode;
                    log::info!("Idle mode: {}", g.input.idle_mode);
                }
                _ => handled = false,
            }
            if handled {
                event.prevent_default();
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // rAF hands us a ms timestamp; the first frame gets one tick
            let dt_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                SIM_DT_MS
            };
            g.last_time = time;

            g.maybe_start_demo(js_sys::Date::now());
            g.update(dt_ms, time);

            let snap = RenderSnapshot::capture(&g.state);
            g.update_hud(&snap);
            push_snapshot(&snap);
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pause_menu(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.pause = true; // Toggle back to playing
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.settings.pause_on_blur && g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
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

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.pause_on_blur && g.state.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use chrono_dash::consts::SIM_DT_MS;
    use chrono_dash::sim::{GameEvent, GamePhase, GameState, RenderSnapshot, TickInput, tick};
    use chrono_dash::tuning::Tuning;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(1)
        });

    log::info!("Chrono Dash headless demo, seed {}", seed);

    let mut state = GameState::new(seed, Tuning::default());
    let input = TickInput {
        idle_mode: true,
        ..TickInput::default()
    };

    // two minutes of attract mode, or until the pilot crashes
    let max_ticks = (120_000.0 / SIM_DT_MS) as u64;
    for _ in 0..max_ticks {
        for event in tick(&mut state, &input, SIM_DT_MS) {
            match event {
                GameEvent::LevelUp { level } => log::info!("level {}", level + 1),
                GameEvent::PowerActivated { power } => log::debug!("{} activated", power.as_str()),
                GameEvent::GameOver { score, level, .. } => {
                    log::info!("crashed at level {} with {} points", level + 1, score)
                }
                _ => {}
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let snap = RenderSnapshot::capture(&state);
    println!(
        "seed {} ran {:.1}s: {} pts, level {}, {} hazards passed",
        seed,
        state.elapsed_secs(),
        snap.score,
        snap.level + 1,
        snap.stats.passed
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
