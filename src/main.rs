//! Ball Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use ball_shooter::hud::DomHud;
    use ball_shooter::platform::{Task, TaskQueue};
    use ball_shooter::renderer::{CanvasSurface, Surface};
    use ball_shooter::sim::Viewport;
    use ball_shooter::{Round, Settings};

    /// Longest wall-clock gap simulated in one frame (e.g. after a hidden tab)
    const MAX_FRAME_GAP_MS: f64 = 100.0;

    /// Game instance holding all state
    struct Game {
        round: Round,
        queue: TaskQueue,
        surface: CanvasSurface,
        hud: DomHud,
        last_time: Option<f64>,
    }

    impl Game {
        /// Run every task due since the previous animation frame
        fn update(&mut self, time: f64) {
            let dt = match self.last_time {
                Some(last) => (time - last).clamp(0.0, MAX_FRAME_GAP_MS),
                None => 0.0,
            };
            self.last_time = Some(time);

            let until = self.queue.now_ms() + dt;
            let Game {
                round,
                queue,
                surface,
                hud,
                ..
            } = self;
            round.pump(queue, until, surface, hud);
        }
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    fn window_size(window: &web_sys::Window) -> (f32, f32) {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (width as f32, height as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;
        log::info!("Ball Shooter starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id("canvas")
            .ok_or("missing #canvas")?
            .dyn_into::<HtmlCanvasElement>()?;

        let (width, height) = window_size(&window);
        let mut surface = CanvasSurface::new(canvas)?;
        surface.resize(width, height);

        let settings = Settings::default();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let viewport = Viewport::new(width, height).map_err(js_err)?;
        let mut queue = TaskQueue::new(settings.frame_period_ms);
        let round = Round::new(settings, viewport, seed).map_err(js_err)?;
        log::info!("Game initialized with seed: {}", seed);

        queue.push(Task::Start);

        let game = Rc::new(RefCell::new(Game {
            round,
            queue,
            surface,
            hud: DomHud::from_document(&document),
            last_time: None,
        }));

        setup_input_handlers(&window, &document, game.clone());
        request_animation_frame(game);

        log::info!("Ball Shooter running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
    ) {
        // Click to fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let target = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                game.borrow_mut().queue.push(Task::Fire(target));
            });
            let _ = window
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize restarts the round at the new size
        {
            let game = game.clone();
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (width, height) = window_size(&window_clone);
                game.borrow_mut()
                    .queue
                    .push(Task::Resize { width, height });
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Play again
        if let Some(btn) = document.get_element_by_id("play-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Don't let the button click also fire a shot
                event.stop_propagation();
                game.borrow_mut().queue.push(Task::Start);
                log::info!("Play again");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; stopping");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        // Keep the browser loop alive before running any game work
        request_animation_frame(game.clone());
        game.borrow_mut().update(time);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Headless demo: an autopilot plays one round against the real simulation
#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use glam::Vec2;

    use ball_shooter::hud::LogHud;
    use ball_shooter::platform::{Task, TaskQueue};
    use ball_shooter::renderer::RecordingSurface;
    use ball_shooter::sim::{GamePhase, GameState, Viewport};
    use ball_shooter::{Round, Settings};

    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 600.0;
    /// Give up after five minutes of game time
    const MAX_GAME_MS: f64 = 5.0 * 60.0 * 1000.0;
    /// Autopilot trigger cadence
    const FIRE_EVERY_MS: f64 = 250.0;

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load_from_file(path)?,
            None => Settings::default(),
        };
        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

        log::info!("Ball Shooter (native) starting with seed {}", seed);

        let mut queue = TaskQueue::new(settings.frame_period_ms);
        let mut round = Round::new(settings, Viewport::new(WIDTH, HEIGHT)?, seed)?;
        let mut surface = RecordingSurface::new(WIDTH, HEIGHT).with_capacity_limit(4096);
        let mut hud = LogHud::default();

        queue.push(Task::Start);
        while queue.now_ms() < MAX_GAME_MS {
            let until = queue.now_ms() + FIRE_EVERY_MS;
            round.pump(&mut queue, until, &mut surface, &mut hud);
            if round.phase() == GamePhase::GameOver {
                break;
            }
            if let Some(target) = aim(round.state(), round.settings().projectile_speed) {
                queue.push(Task::Fire(target));
            }
        }

        log::info!(
            "Played {:.1}s of game time ({} ticks)",
            queue.now_ms() / 1000.0,
            round.state().time_ticks
        );
        println!("Final score: {}", round.score());
        Ok(())
    }

    /// Lead the enemy closest to the player
    fn aim(state: &GameState, projectile_speed: f32) -> Option<Vec2> {
        let center = state.player.pos;
        state
            .enemies
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance(center)
                    .total_cmp(&b.pos.distance(center))
            })
            .map(|enemy| {
                let ticks = enemy.pos.distance(center) / projectile_speed;
                enemy.pos + enemy.vel * ticks
            })
    }
}
