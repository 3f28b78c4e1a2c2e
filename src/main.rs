//! Pac Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use pac_snake::platform::LocalStorageStore;
    use pac_snake::renderer::CanvasRenderer;
    use pac_snake::sim::GamePhase;
    use pac_snake::{Command, Game, Tuning};

    /// Driver holding the single game instance
    struct App {
        game: Game<LocalStorageStore>,
        renderer: Option<CanvasRenderer>,
    }

    impl App {
        fn update(&mut self, time: f64) {
            if let Some(outcome) = self.game.frame(time) {
                if let Some(cause) = outcome.game_over {
                    log::info!("Run ended: {}", cause.as_str());
                }
            }
        }

        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.game.snapshot());
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snap = self.game.snapshot();
            let session = self.game.session();

            let set_text = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };
            set_text("time", &session.format_metric(snap.metric));
            set_text("len", &snap.length().to_string());
            set_text("best", &session.format_metric(snap.best));
            set_text("speed", &session.format_speed());
        }
    }

    /// Same clock as the requestAnimationFrame timestamp
    fn performance_now() -> Option<f64> {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
    }

    /// Apply an input, timed from the event when the clock is available
    fn apply_input(app: &mut App, command: Command) {
        match performance_now() {
            Some(now) => app.game.apply_at(command, now),
            None => app.game.apply(command),
        }
    }

    /// Profile from the page URL (`?profile=zen`), defaulting to survival
    fn tuning_from_location() -> Tuning {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let profile = search
            .trim_start_matches('?')
            .split('&')
            .find_map(|kv| kv.strip_prefix("profile="))
            .unwrap_or("survival");
        Tuning::profile(profile).unwrap_or_else(|e| {
            log::warn!("{}; using survival", e);
            Tuning::survival()
        })
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Pac Snake starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let renderer = document
            .get_element_by_id("game")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(CanvasRenderer::new);
        if renderer.is_none() {
            log::error!("No #game canvas with a 2D context; running headless");
        }

        let seed = js_sys::Date::now() as u64;
        let game = match Game::new(tuning_from_location(), seed, LocalStorageStore) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Invalid tuning: {}", e);
                return;
            }
        };
        let app = Rc::new(RefCell::new(App { game, renderer }));

        setup_keyboard(app.clone());
        setup_buttons(app.clone());
        setup_auto_pause(app.clone());
        setup_resize(app.clone());

        {
            let a = app.borrow();
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);

        log::info!("Pac Snake running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if let Some(command) = Command::from_key(&event.key()) {
                event.prevent_default();
                let mut a = app.borrow_mut();
                apply_input(&mut a, command);
                a.render();
                a.update_hud();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for id in ["btnStart", "btnRestart", "btnSlow", "btnFast"] {
            let (Some(btn), Some(command)) = (document.get_element_by_id(id), Command::from_button(id))
            else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                apply_input(&mut a, command);
                a.render();
                a.update_hud();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut a = app.borrow_mut();
                    if a.game.state().phase() == GamePhase::Playing {
                        a.game.toggle_running();
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
                let mut a = app.borrow_mut();
                if a.game.state().phase() == GamePhase::Playing {
                    a.game.toggle_running();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow().render();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if a.game.state().phase() == GamePhase::Playing {
                a.update(time);
                a.render();
                a.update_hud();
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless runner: the demo bot plays one game and reports the result.
///
/// Usage: `pac-snake [profile|tuning.json] [seed] [max_ticks]`
#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use pac_snake::autopilot::choose_direction;
    use pac_snake::platform::MemoryStore;
    use pac_snake::{Game, Tuning, TuningError};

    const DEFAULT_MAX_TICKS: u64 = 5_000;

    pub fn run(args: &[String]) -> Result<(), TuningError> {
        let tuning = match args.first() {
            Some(arg) if arg.ends_with(".json") => Tuning::from_path(arg)?,
            Some(arg) => Tuning::profile(arg)?,
            None => Tuning::survival(),
        };
        let seed = args
            .get(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or(0)
            });
        let max_ticks = args
            .get(2)
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_TICKS);

        let mut game = Game::new(tuning, seed, MemoryStore::new())?;
        let mut now = 0.0;
        game.toggle_running_at(now);

        // Whole-millisecond frames one interval apart so every frame ticks
        let frame_ms = game.snapshot().tick_interval_ms.ceil();

        let mut ticks = 0u64;
        while ticks < max_ticks {
            let dir = choose_direction(&game.snapshot());
            game.set_queued_direction(dir);
            now += frame_ms;
            let Some(outcome) = game.frame(now) else {
                if game.snapshot().running {
                    continue;
                }
                break;
            };
            ticks += 1;
            if ticks % 500 == 0 {
                let snap = game.snapshot();
                log::info!(
                    "tick {}: len={} items={} metric={}",
                    ticks,
                    snap.length(),
                    snap.items.len(),
                    game.session().format_metric(snap.metric)
                );
            }
            if outcome.game_over.is_some() {
                break;
            }
        }

        let snap = game.snapshot();
        let session = game.session();
        println!("profile:  {}", game.state().tuning().name);
        println!("seed:     {}", seed);
        println!("ticks:    {}", ticks);
        println!("length:   {}", snap.length());
        println!(
            "{}:    {}",
            session.mode.as_str().to_lowercase(),
            session.format_metric(snap.metric)
        );
        match (&snap.message, snap.cause) {
            (Some(message), Some(cause)) => println!("result:   {} ({})", message, cause.as_str()),
            _ => println!("result:   still alive"),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pac Snake (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = native::run(&args) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
