//! Application window and OpenGL context management.
//!
//! Window creation, OpenGL context setup and egui integration. Platform and
//! graphics concerns stay here; the universe simulation never sees them.

use std::ffi::CString;
use std::num::NonZeroU32;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowAttributes};

use egui_glow::EguiGlow;

use crate::constants::*;

/// Result of window and GL context creation.
pub struct WindowContext {
    pub window: Window,
    pub gl_surface: glutin::surface::Surface<WindowSurface>,
    pub gl_context: glutin::context::PossiblyCurrentContext,
    pub gl: Arc<glow::Context>,
    pub egui_glow: EguiGlow,
}

const NO_GL_CONFIG: &str = "Display offered no GL config matching the template";

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

/// Pick the candidate with the most MSAA samples; the first wins ties.
fn most_samples<T>(candidates: impl Iterator<Item = T>, samples: impl Fn(&T) -> u8) -> Option<T> {
    candidates.reduce(|accum, candidate| {
        if samples(&candidate) > samples(&accum) {
            candidate
        } else {
            accum
        }
    })
}

/// Create a window with OpenGL context and egui integration.
pub fn create_window(event_loop: &ActiveEventLoop) -> Result<WindowContext, String> {
    let window_attrs = WindowAttributes::default()
        .with_title("Universe Dial")
        .with_inner_size(PhysicalSize::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT))
        .with_resizable(true);

    let template = ConfigTemplateBuilder::new().with_alpha_size(8);
    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

    // Prefer the config with the most MSAA samples. The picker has to return
    // a config, so an empty list (EGL can report zero matches) unwinds out of
    // it and is turned into an error here.
    let built = panic::catch_unwind(AssertUnwindSafe(|| {
        display_builder.build(event_loop, template, |configs| {
            most_samples(configs, |config| config.num_samples()).expect(NO_GL_CONFIG)
        })
    }));
    let (window, gl_config) = match built {
        Ok(result) => result.map_err(|e| format!("Failed to create window: {}", e))?,
        Err(_) => return Err(NO_GL_CONFIG.to_string()),
    };

    let window = window.ok_or("Display builder returned no window")?;
    let window_handle = window
        .window_handle()
        .map_err(|e| format!("No window handle: {}", e))?;
    let gl_display = gl_config.display();

    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(window_handle.as_raw()));

    let gl_context = unsafe {
        gl_display
            .create_context(&gl_config, &context_attrs)
            .map_err(|e| format!("Failed to create OpenGL context: {}", e))?
    };

    let size = window.inner_size();
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        window_handle.as_raw(),
        non_zero(size.width),
        non_zero(size.height),
    );

    let gl_surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &surface_attrs)
            .map_err(|e| format!("Failed to create surface: {}", e))?
    };

    let gl_context = gl_context
        .make_current(&gl_surface)
        .map_err(|e| format!("Failed to make context current: {}", e))?;

    let gl = Arc::new(unsafe {
        glow::Context::from_loader_function(|s| match CString::new(s) {
            Ok(s) => gl_display.get_proc_address(&s) as *const _,
            Err(_) => std::ptr::null(),
        })
    });

    let egui_glow = EguiGlow::new(event_loop, gl.clone(), None, None, false);

    // Night-sky styling
    {
        let ctx = &egui_glow.egui_ctx;
        ctx.set_fonts(crate::ui::style::load_fonts());
        ctx.set_style(crate::ui::style::universe_style());
    }

    log::info!("Window created at {}x{}", size.width, size.height);

    Ok(WindowContext {
        window,
        gl_surface,
        gl_context,
        gl,
        egui_glow,
    })
}

/// Resize the GL surface to match the window size.
pub fn resize_surface(
    gl_surface: &glutin::surface::Surface<WindowSurface>,
    gl_context: &glutin::context::PossiblyCurrentContext,
    width: u32,
    height: u32,
) {
    if width > 0 && height > 0 {
        gl_surface.resize(gl_context, non_zero(width), non_zero(height));
    }
}

/// Switch between windowed and borderless fullscreen
pub fn toggle_fullscreen(window: &Window) {
    if window.fullscreen().is_some() {
        window.set_fullscreen(None);
    } else {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_samples_prefers_highest() {
        let picked = most_samples([(1, 0u8), (2, 4), (3, 4), (4, 2)].into_iter(), |c| c.1);
        assert_eq!(picked, Some((2, 4)));
    }

    #[test]
    fn test_most_samples_empty_is_none() {
        let picked = most_samples(std::iter::empty::<(i32, u8)>(), |c| c.1);
        assert_eq!(picked, None);
    }

    #[test]
    fn test_non_zero_floors_at_one() {
        assert_eq!(non_zero(0).get(), 1);
        assert_eq!(non_zero(640).get(), 640);
    }
}
