//! Rendering context - owns rendering resources separate from simulation state.

mod markers;

pub use markers::{date_grid_lines, MarkerAnimator};

use crate::camera::Camera;
use crate::config::{ConfigError, UniverseConfig};
use crate::constants::*;
use crate::renderer::{Quad, Renderer};
use crate::simulation::Universe;
use crate::starfield::Starfield;

use glam::Vec2;
use std::path::Path;
use std::sync::Arc;

const GRID_LINE_COLOR: [f32; 4] = [0.3, 0.45, 0.9, 0.25];

/// Decode an image file into RGBA8
pub fn load_background(path: &Path) -> Result<image::RgbaImage, ConfigError> {
    image::open(path)
        .map(|img| img.into_rgba8())
        .map_err(|source| ConfigError::Image {
            path: path.to_path_buf(),
            source,
        })
}

/// Rendering resources - lives in the application shell (main.rs).
/// Separate from the simulation to maintain clear boundaries.
pub struct RenderContext {
    pub camera: Camera,
    pub renderer: Renderer,
    starfield: Starfield,
    markers: MarkerAnimator,
    grid_lines: Vec<(Vec2, Vec2)>,
    star_quads: Vec<Quad>,
}

impl RenderContext {
    /// Create a new render context with the given GL context.
    /// A background image that fails to load is logged and skipped.
    pub fn new(
        gl: Arc<glow::Context>,
        config: &UniverseConfig,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Result<Self, String> {
        let camera = Camera::new(viewport_width, viewport_height);
        let mut renderer = Renderer::new(gl)?;

        if let Some(path) = &config.background {
            match load_background(path) {
                Ok(image) => renderer.set_background(&image)?,
                Err(e) => log::error!("{}; drawing the starfield alone", e),
            }
        }

        let extent = Vec2::new(config.motion.max_x, config.motion.max_y) + Vec2::splat(STARFIELD_MARGIN);
        let starfield = Starfield::generate(config.starfield.seed, config.starfield.count, extent);
        log::info!("Generated {} stars", starfield.stars.len());

        Ok(Self {
            camera,
            renderer,
            starfield,
            markers: MarkerAnimator::new(config.starfield.seed),
            grid_lines: date_grid_lines(&config.motion),
            star_quads: Vec::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width as f32, height as f32);
        self.renderer.resize(width as i32, height as i32);
    }

    /// Render the universe map. `time` is unscaled seconds, so stars keep
    /// twinkling while the game is paused.
    pub fn render_frame(&mut self, universe: &Universe, time: f32, show_grid_lines: bool) {
        puffin::profile_function!();

        self.camera.sync(universe.coordinate());
        self.renderer.clear();

        {
            puffin::profile_scope!("render_background");
            let extent = self.starfield.extent;
            self.renderer.draw_background(&self.camera, -extent, extent);
        }
        {
            puffin::profile_scope!("render_stars");
            let (min, max) = self.camera.visible_bounds();
            self.star_quads.clear();
            self.star_quads.extend(self.starfield.visible(min, max).map(|star| Quad {
                position: star.position,
                size: star.size,
                color: [star.color[0], star.color[1], star.color[2], star.brightness(time)],
            }));
            self.renderer.draw_quads(&self.camera, &self.star_quads);
        }
        if show_grid_lines {
            puffin::profile_scope!("render_grid");
            self.renderer
                .draw_lines(&self.camera, &self.grid_lines, GRID_LINE_COLOR);
        }
        {
            puffin::profile_scope!("render_markers");
            let quads = self.markers.quads(&universe.locations, time);
            self.renderer.draw_quads(&self.camera, &quads);
        }
    }
}
