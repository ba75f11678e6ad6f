//! Fade overlay, clip screen and acknowledgement panel.

use super::style;
use super::UiActions;
use crate::simulation::Universe;
use crate::video::ClipPlayer;

/// Data needed to render the playback overlay
pub struct OverlayData {
    pub fade_opacity: f32,
    pub overlay_visible: bool,
    pub panel_visible: bool,
    pub location_name: Option<String>,
    pub clip_title: Option<String>,
    pub clip_progress: f32,
    pub clip_remaining: f32,
}

impl OverlayData {
    pub fn new(universe: &Universe, player: &ClipPlayer) -> Self {
        let gate = &universe.gate;
        let status = player.now_playing();
        Self {
            fade_opacity: gate.fade_opacity(),
            overlay_visible: gate.overlay_visible(),
            panel_visible: gate.panel_visible(),
            location_name: gate.current().map(|v| v.name.clone()),
            clip_title: status.as_ref().map(|s| s.title.to_string()),
            clip_progress: status.as_ref().map(|s| s.progress()).unwrap_or(0.0),
            clip_remaining: status
                .as_ref()
                .map(|s| (s.duration - s.elapsed).max(0.0))
                .unwrap_or(0.0),
        }
    }
}

/// Layer of the fade: above the HUD and dial windows
pub const FADE_ORDER: egui::Order = egui::Order::Foreground;
/// Layer of the clip screen, panel and pause menu: above the fade
pub const MODAL_ORDER: egui::Order = egui::Order::Tooltip;

pub fn fade_alpha(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Full-screen black fade covering the HUD and dials. It also swallows
/// pointer input so nothing underneath can be clicked mid-fade.
pub fn draw_fade(ctx: &egui::Context, opacity: f32) {
    let alpha = fade_alpha(opacity);
    if alpha == 0 {
        return;
    }
    let rect = ctx.screen_rect();
    egui::Area::new(egui::Id::new("fade"))
        .order(FADE_ORDER)
        .fixed_pos(rect.min)
        .show(ctx, |ui| {
            ui.allocate_rect(rect, egui::Sense::click_and_drag());
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_black_alpha(alpha));
        });
}

pub fn draw_playback_overlay(ctx: &egui::Context, data: &OverlayData, actions: &mut UiActions) {
    if data.overlay_visible {
        egui::Window::new("Now Playing")
            .order(MODAL_ORDER)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([480.0, 300.0])
            .title_bar(false)
            .frame(style::universe_window_frame().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(90.0);
                    ui.label(
                        egui::RichText::new(data.clip_title.as_deref().unwrap_or("..."))
                            .size(28.0)
                            .color(style::colors::TEXT_ACCENT),
                    );
                    ui.add_space(20.0);
                    ui.add(
                        egui::ProgressBar::new(data.clip_progress)
                            .desired_width(360.0)
                            .text(format!("{:.0}s", data.clip_remaining.ceil())),
                    );
                    ui.add_space(20.0);
                    if ui.button("Skip").clicked() {
                        actions.skip_clip = true;
                    }
                });
            });
    }

    if data.panel_visible {
        egui::Window::new("Visited")
            .order(MODAL_ORDER)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .title_bar(false)
            .resizable(false)
            .frame(style::universe_window_frame())
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(data.location_name.as_deref().unwrap_or("Location"))
                            .size(24.0)
                            .color(style::colors::TEXT_ACCENT),
                    );
                    ui.label("has been visited.");
                    ui.add_space(10.0);
                    if ui.button("Continue").clicked() {
                        actions.dismiss_panel = true;
                    }
                });
            });
    }
}
