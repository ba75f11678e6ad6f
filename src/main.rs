#![allow(dead_code)]

mod app;
mod camera;
mod config;
mod constants;
mod dial;
mod events;
mod fade;
mod input;
mod locations;
mod motion;
mod playback;
mod proximity;
mod render;
mod renderer;
mod simulation;
mod starfield;
mod time_system;
mod ui;
mod video;

use config::UniverseConfig;
use dial::DialPanel;
use events::GameEvent;
use render::RenderContext;
use simulation::Universe;
use std::sync::Arc;
use std::time::Instant;
use video::{ClipLibrary, ClipPlayer};

use glutin::prelude::*;
use glutin::surface::WindowSurface;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use egui_glow::EguiGlow;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let config = UniverseConfig::load_or_default(&UniverseConfig::resolve_path());
    for problem in config.missing_assets() {
        log::warn!("{}", problem);
    }

    let profiler = if config.profiling {
        puffin::set_scopes_on(true);
        let addr = format!("0.0.0.0:{}", puffin_http::DEFAULT_PORT);
        match puffin_http::Server::new(&addr) {
            Ok(server) => {
                log::info!("Profiler listening on {}", addr);
                Some(server)
            }
            Err(e) => {
                log::error!("Failed to start profiler on {}: {}", addr, e);
                None
            }
        }
    } else {
        None
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, profiler);
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App {
    config: UniverseConfig,
    state: Option<AppState>,
    /// Held so the profiler keeps serving
    _profiler: Option<puffin_http::Server>,
}

struct AppState {
    // Window and GL
    window: Window,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    gl: Arc<glow::Context>,
    egui_glow: EguiGlow,

    // Rendering
    render: RenderContext,

    // Simulation
    universe: Universe,
    player: ClipPlayer,
    config: UniverseConfig,

    // Time system
    clock: time_system::GameClock,

    // UI and input
    dials: DialPanel,
    ui_state: ui::GameUiState,
    input: input::InputState,

    // Timing
    last_frame_time: Instant,
    should_quit: bool,
}

impl App {
    fn new(config: UniverseConfig, profiler: Option<puffin_http::Server>) -> Self {
        Self {
            config,
            state: None,
            _profiler: profiler,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
        } = match app::create_window(event_loop) {
            Ok(ctx) => ctx,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let render = match RenderContext::new(gl.clone(), &self.config, size.width as f32, size.height as f32) {
            Ok(render) => render,
            Err(e) => {
                log::error!("Failed to create renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let mut input = input::InputState::new();
        input.window_size = (size.width as f32, size.height as f32);

        let universe = Universe::from_config(&self.config);
        log::info!(
            "Universe ready: {} locations, starting at {}",
            universe.locations.len(),
            universe.date()
        );

        self.state = Some(AppState {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
            render,
            universe,
            player: ClipPlayer::new(ClipLibrary::from_specs(&self.config.clips)),
            config: self.config.clone(),
            clock: time_system::GameClock::new(),
            dials: DialPanel::new(self.config.dials),
            ui_state: ui::GameUiState::new(),
            input,
            last_frame_time: Instant::now(),
            should_quit: false,
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        // Let egui handle the event first
        let egui_consumed = state.egui_glow.on_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&state.gl_surface, &state.gl_context, size.width, size.height);
                state.render.resize(size.width, size.height);
                state.input.window_size = (size.width as f32, size.height as f32);
            }
            WindowEvent::Focused(false) => {
                state.input.release_all();
                state.dials.release_all();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed if !egui_consumed.consumed => state.input.key_down(key),
                        ElementState::Pressed => {}
                        // Always release, so keys never stick behind a focused widget
                        ElementState::Released => state.input.key_up(key),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.input.mouse_pos = (position.x as f32, position.y as f32);
                state.input.mouse_inside = true;
            }
            WindowEvent::CursorLeft { .. } => {
                state.input.mouse_inside = false;
            }
            WindowEvent::RedrawRequested => {
                state.update_and_render();
                if state.should_quit {
                    event_loop.exit();
                    return;
                }
                state.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl AppState {
    fn update_and_render(&mut self) {
        puffin::GlobalProfiler::lock().new_frame();
        puffin::profile_function!();

        let current_time = Instant::now();
        let raw_dt = (current_time - self.last_frame_time).as_secs_f32();
        self.last_frame_time = current_time;

        let frame = self.clock.advance(raw_dt);

        self.handle_input();

        // Clip progress runs on scaled time, so pausing freezes the clip
        self.player.update(frame.dt, &mut self.universe.events);

        let mut edge_scroll = self.config.edge_scroll;
        if self.egui_glow.egui_ctx.is_pointer_over_area() {
            edge_scroll.enabled = false;
        }
        let motion = self.input.motion_input(&edge_scroll);

        let routed = self.universe.tick(frame, motion, &mut self.player);
        for event in &routed {
            self.ui_state.handle_event(event);
        }
        self.ui_state.update(frame.unscaled_dt);

        let ui_actions = self.run_ui(frame.unscaled_dt);
        self.process_ui_actions(ui_actions);

        self.render
            .render_frame(&self.universe, self.clock.unscaled_time, self.ui_state.show_grid_lines);

        self.egui_glow.paint(&self.window);

        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            log::error!("Failed to swap buffers: {}", e);
        }
    }

    fn run_ui(&mut self, unscaled_dt: f32) -> ui::UiActions {
        puffin::profile_function!();
        let mut actions = ui::UiActions::default();

        let hud = ui::HudData::from_universe(&self.universe);
        let overlay = ui::OverlayData::new(&self.universe, &self.player);
        let toasts = &self.ui_state.toasts;
        let paused = self.clock.is_paused();
        let dials = &mut self.dials;

        self.egui_glow.run(&self.window, |ctx| {
            ui::draw_hud(ctx, &hud);
            ui::draw_toasts(ctx, toasts);
            if !paused {
                ui::draw_dial_panel(ctx, dials, unscaled_dt, &mut actions);
            }

            ui::draw_fade(ctx, overlay.fade_opacity);
            ui::draw_playback_overlay(ctx, &overlay, &mut actions);

            if paused {
                ui::draw_pause_menu(ctx, &mut actions);
            }
        });

        actions
    }

    fn process_ui_actions(&mut self, actions: ui::UiActions) {
        // Dial deltas are consumed on the next tick
        self.universe.events.extend(actions.dial_events);

        if actions.dismiss_panel {
            self.universe.events.push(GameEvent::PanelDismissed);
        }
        if actions.skip_clip {
            self.player.skip(&mut self.universe.events);
        }
        if actions.resume && self.clock.resume() {
            self.universe.events.push(GameEvent::PauseToggled { paused: false });
        }
        if actions.quit {
            log::info!("Quit requested");
            self.should_quit = true;
        }
    }

    fn handle_input(&mut self) {
        let result = input::process_keyboard(&mut self.input);

        if result.toggle_pause {
            let paused = self.clock.toggle_pause();
            if paused {
                // Drags would pile up in the accumulator while motion is frozen
                self.dials.release_all();
            }
            self.universe.events.push(GameEvent::PauseToggled { paused });
        }
        if result.toggle_fullscreen {
            app::toggle_fullscreen(&self.window);
        }
        if result.toggle_grid_lines {
            self.ui_state.toggle_grid_lines();
        }
        if result.dismiss_panel {
            self.universe.events.push(GameEvent::PanelDismissed);
        }
        if result.skip_clip && !self.player.skip(&mut self.universe.events) {
            log::debug!("Nothing to skip");
        }
    }
}
