//! UI rendering using egui.
//!
//! Handles all universe UI: the date HUD, the dial panel, the playback
//! overlay and the pause menu. Windows never touch the simulation directly;
//! they report what the user did through `UiActions`.

mod dials;
mod hud;
mod overlay;
mod pause_menu;
pub mod style;

pub use dials::draw_dial_panel;
pub use hud::{draw_hud, draw_toasts, HudData};
pub use overlay::{draw_fade, draw_playback_overlay, OverlayData};
pub use pause_menu::draw_pause_menu;

use crate::constants::TOAST_SECONDS;
use crate::events::GameEvent;

/// Actions the UI wants to perform (returned to the application shell)
#[derive(Debug, Default)]
pub struct UiActions {
    /// Scaled dial emissions, to be pushed onto the event queue
    pub dial_events: Vec<GameEvent>,
    pub dismiss_panel: bool,
    pub skip_clip: bool,
    pub resume: bool,
    pub quit: bool,
}

/// Short-lived notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub text: String,
    pub remaining: f32,
}

// =============================================================================
// GAME UI STATE (event-driven)
// =============================================================================

/// UI state that responds to events.
///
/// The UI reacts to simulation events rather than being set imperatively.
#[derive(Debug, Default)]
pub struct GameUiState {
    /// Show the day/month grid
    pub show_grid_lines: bool,
    pub toasts: Vec<Toast>,
}

impl GameUiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a routed event, updating UI state as needed
    pub fn handle_event(&mut self, event: &GameEvent) {
        if let GameEvent::LocationVisited { name, .. } = event {
            self.toasts.push(Toast {
                text: format!("Discovered {}", name),
                remaining: TOAST_SECONDS,
            });
        }
    }

    /// Age toasts by unscaled time, dropping expired ones
    pub fn update(&mut self, unscaled_dt: f32) {
        for toast in &mut self.toasts {
            toast.remaining -= unscaled_dt;
        }
        self.toasts.retain(|t| t.remaining > 0.0);
    }

    pub fn toggle_grid_lines(&mut self) {
        self.show_grid_lines = !self.show_grid_lines;
    }
}
