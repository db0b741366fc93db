//! Lunar Lander entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use lunar_lander::consts::*;
    use lunar_lander::renderer::draw::{HUD_FONT_SIZE, HUD_SPACING};
    use lunar_lander::renderer::{Canvas, QuadBatch, RenderState, render_scene};
    use lunar_lander::sim::TickInput;
    use lunar_lander::{AppStatus, Assets, Session, Settings};

    const FPS_ANCHOR: glam::Vec3 = glam::Vec3::new(-4.75, 3.1, 0.0);

    /// Game instance holding all state
    struct Game {
        session: Session,
        assets: Assets,
        settings: Settings,
        render_state: Option<RenderState>,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, assets: Assets, settings: Settings) -> Self {
            Self {
                session: Session::new(seed, &assets.set),
                assets,
                settings,
                render_state: None,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Feed one frame to the session
        fn update(&mut self, dt: f32, time: f64) -> AppStatus {
            let dt = self.settings.clamp_frame_time(dt);
            let status = self.session.frame(&self.input, dt);

            // Clear one-shot inputs after processing
            self.input.restart = false;
            self.input.quit = false;

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

            status
        }

        /// Render the current frame
        fn render(&mut self) {
            let mut batch = QuadBatch::new(&self.assets);
            render_scene(&self.session.state, &mut batch);
            if self.settings.show_fps {
                batch.draw_text(
                    &format!("FPS: {}", self.fps),
                    HUD_FONT_SIZE,
                    HUD_SPACING,
                    FPS_ANCHOR,
                );
            }

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&batch.vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lunar Lander starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Missing sprites are unrecoverable
        let assets = match Assets::builtin() {
            Ok(assets) => assets,
            Err(e) => {
                log::error!("Failed to load sprites: {}", e);
                panic!("asset load failed: {e}");
            }
        };

        let settings = Settings::load();
        let seed = settings.seed_or(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, assets, settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Lunar Lander running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down: thrusters are held, restart/quit are one-shot
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "ArrowUp" => g.input.up = true,
                    "r" | "R" => g.input.restart = true,
                    "q" | "Q" | "Escape" => g.input.quit = true,
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    _ => return,
                }
                event.prevent_default();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: release thrusters
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "ArrowUp" => g.input.up = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        let status = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            let status = g.update(dt, time);
            g.render();
            status
        };

        match status {
            AppStatus::Running => request_animation_frame(game),
            AppStatus::Terminated => log::info!("Lunar Lander stopped"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use lunar_lander::consts::SIM_DT;
    use lunar_lander::renderer::{DrawList, render_scene};
    use lunar_lander::sim::GamePhase;
    use lunar_lander::{AppStatus, Assets, Session, Settings};

    env_logger::init();
    log::info!("Lunar Lander (native) starting...");
    log::info!("Native mode runs a headless demo descent - run with `trunk serve` to play");

    let assets = match Assets::builtin() {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("Failed to load sprites: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    let settings = Settings::load();
    let clock_seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut session = Session::new(settings.seed_or(clock_seed), &assets.set);
    let mut frame = DrawList::new();

    // Two simulated minutes is plenty for any descent
    for _ in 0..(120.0 / SIM_DT) as u32 {
        let input = demo_pilot::steer(&session.state);
        if session.frame(&input, SIM_DT) == AppStatus::Terminated {
            break;
        }

        frame.clear();
        render_scene(&session.state, &mut frame);
        if session.phase().is_game_over() {
            break;
        }
    }

    let hud: Vec<&str> = frame.texts().collect();
    match session.phase() {
        GamePhase::Won => println!("Landed! {}", hud.join(" | ")),
        GamePhase::Lost => println!("Crashed. {}", hud.join(" | ")),
        GamePhase::Playing => println!("Still airborne after the demo window. {}", hud.join(" | ")),
    }

    std::process::ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simple proportional controller used by the native demo
#[cfg(not(target_arch = "wasm32"))]
mod demo_pilot {
    use lunar_lander::sim::{GameState, TickInput};

    const MAX_DRIFT: f32 = 0.6;
    const DRIFT_GAIN: f32 = 0.8;
    const SINK_RATE: f32 = -0.35;
    const DEADBAND: f32 = 0.05;

    /// Drift toward the nearest platform and hold a gentle sink rate
    pub fn steer(state: &GameState) -> TickInput {
        let lander = &state.player;
        let Some(target) = state
            .platforms
            .iter()
            .filter(|p| p.is_active)
            .min_by(|a, b| {
                let da = (a.position.x - lander.position.x).abs();
                let db = (b.position.x - lander.position.x).abs();
                da.total_cmp(&db)
            })
        else {
            return TickInput::default();
        };

        let want_vx = ((target.position.x - lander.position.x) * DRIFT_GAIN)
            .clamp(-MAX_DRIFT, MAX_DRIFT);
        let vx = lander.velocity.x;

        TickInput {
            left: vx > want_vx + DEADBAND,
            right: vx < want_vx - DEADBAND,
            up: lander.velocity.y < SINK_RATE,
            ..Default::default()
        }
    }
}
