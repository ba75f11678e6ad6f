//! Pause menu shown while scaled time is frozen.

use super::overlay::MODAL_ORDER;
use super::style;
use super::UiActions;

pub fn draw_pause_menu(ctx: &egui::Context, actions: &mut UiActions) {
    let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::Background, egui::Id::new("pause_dim")));
    painter.rect_filled(ctx.screen_rect(), 0.0, egui::Color32::from_black_alpha(140));

    egui::Window::new("Paused")
        .order(MODAL_ORDER)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .title_bar(false)
        .resizable(false)
        .frame(style::universe_window_frame())
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new("Paused").color(style::colors::TEXT_ACCENT));
                ui.add_space(12.0);
                if ui.add_sized([140.0, 28.0], egui::Button::new("Resume")).clicked() {
                    actions.resume = true;
                }
                ui.add_space(4.0);
                if ui.add_sized([140.0, 28.0], egui::Button::new("Quit")).clicked() {
                    actions.quit = true;
                }
            });
        });
}
