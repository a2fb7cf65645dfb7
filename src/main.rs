//! Barricade entry point
//!
//! Handles platform-specific initialization and runs the game loop. The wasm
//! build wires DOM events into the input queue and drives the simulation
//! from `requestAnimationFrame`; the native build runs a scripted headless
//! session for smoke-testing.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use barricade::Settings;
    use barricade::renderer::{self, Frame};
    use barricade::sim::{InputEvent, InputQueue, World, WorldEvent, tick};

    /// Game instance holding all state
    struct Game {
        world: World,
        input: InputQueue,
        settings: Settings,
        ctx: Option<web_sys::CanvasRenderingContext2d>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(width: f32, height: f32, now_ms: f64) -> Self {
            Self {
                world: World::new(width, height, now_ms),
                input: InputQueue::new(),
                settings: Settings::load(),
                ctx: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn update(&mut self, now_ms: f64) {
            tick(&mut self.world, &mut self.input, now_ms);

            for event in self.world.take_events() {
                match event {
                    WorldEvent::Lost => {
                        log::info!("Game over");
                        if let Some(window) = web_sys::window() {
                            let _ = window.alert_with_message("You lost.");
                        }
                    }
                }
            }
        }

        fn render(&mut self, time: f64) {
            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 && time > oldest {
                self.fps = (59_000.0 / (time - oldest)).round() as u32;
            }

            let Some(ctx) = &self.ctx else { return };
            let frame = Frame::capture(&self.world, &self.settings);
            renderer::draw(ctx, &frame);

            if self.settings.show_fps {
                ctx.set_fill_style_str("black");
                let _ = ctx.fill_text(&format!("{} fps", self.fps), 10.0, 20.0);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Barricade starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the surface to the window once at startup
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
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<web_sys::CanvasRenderingContext2d>().ok());

        let now = js_sys::Date::now();
        let game = Rc::new(RefCell::new(Game::new(width as f32, height as f32, now)));
        game.borrow_mut().ctx = ctx;

        log::info!("World initialized at {width}x{height}");

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Barricade running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let document = web_sys::window()
            .expect("no window")
            .document()
            .expect("no document");

        // Directional keys
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let event = match event.key().as_str() {
                    "ArrowLeft" => Some(InputEvent::MoveLeft),
                    "ArrowRight" => Some(InputEvent::MoveRight),
                    _ => None,
                };
                if let Some(event) = event {
                    game.borrow_mut().input.push(event);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Aim target follows the pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let target =
                    glam::Vec2::new(event.client_x() as f32, event.client_y() as f32);
                game.borrow_mut().input.push(InputEvent::Aim(target));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Trigger held while the pointer is down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.push(InputEvent::TriggerDown);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.push(InputEvent::TriggerUp);
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            // Wall clock for the blocking timeout and the producers
            let now = js_sys::Date::now();
            g.update(now);
            g.render(time);
        }

        // Reschedule unconditionally - entities keep animating after a loss
        request_animation_frame(game);
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use barricade::renderer::Frame;
    use barricade::sim::{GameStatus, InputEvent, InputQueue, World, tick};
    use barricade::Settings;

    env_logger::init();
    log::info!("Barricade (native) starting headless session...");

    let mut world = World::new(800.0, 600.0, 0.0);
    let mut input = InputQueue::new();
    let settings = Settings::load();

    // Scripted session: hold the trigger and lob shots at a fixed point while
    // waves spawn, for two simulated minutes at 60 Hz.
    input.push(InputEvent::Aim(glam::Vec2::new(650.0, 300.0)));
    input.push(InputEvent::TriggerDown);

    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;
    for _ in 0..7200 {
        now += frame_ms;
        tick(&mut world, &mut input, now);
        if world.status == GameStatus::Lost {
            break;
        }
    }

    let frame = Frame::capture(&world, &settings);
    println!(
        "Session ended after {} ticks ({:.1}s simulated)",
        world.time_ticks,
        now / 1000.0
    );
    println!(
        "Status: {:?} | zombies: {} | bullets in flight: {} | blocks: {}",
        world.status,
        world.zombies.len(),
        world.bullets.len(),
        frame.blocks.len()
    );
}
