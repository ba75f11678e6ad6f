//! Dial panel: two linear pan dials and a rotary zoom dial.
//!
//! egui reports pointer positions with y growing downward; dial filters work
//! with y up, so positions are flipped on the way in.

use super::style;
use super::UiActions;
use crate::constants::*;
use crate::dial::{DialFilter, DialMode, DialPanel};
use glam::Vec2;

fn to_dial_space(pos: egui::Pos2) -> Vec2 {
    Vec2::new(pos.x, -pos.y)
}

/// Feed one widget response into its filter
fn interact(filter: &mut DialFilter, response: &egui::Response, unscaled_dt: f32) -> Option<f32> {
    let center = to_dial_space(response.rect.center());
    let mut emitted = None;

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            filter.press(to_dial_space(pos), center);
        }
    }
    if response.dragged() && filter.is_active() {
        if let Some(pos) = response.interact_pointer_pos() {
            emitted = filter.drag(to_dial_space(pos), unscaled_dt);
        }
    }
    if response.drag_stopped() {
        filter.release();
    }
    emitted
}

fn paint_rotary(painter: &egui::Painter, rect: egui::Rect, filter: &DialFilter) {
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * 0.5 - 2.0;
    let rim = if filter.is_active() {
        style::colors::DIAL_ACTIVE
    } else {
        style::colors::DIAL_RIM
    };

    painter.circle_filled(center, radius, style::colors::DIAL_FACE);
    painter.circle_stroke(center, radius, egui::Stroke::new(2.0, rim));

    for notch in 0..12 {
        let a = (notch as f32 * 30.0).to_radians();
        let dir = egui::vec2(a.cos(), -a.sin());
        painter.line_segment(
            [center + dir * (radius - 8.0), center + dir * (radius - 2.0)],
            egui::Stroke::new(1.0, style::colors::TEXT_MUTED),
        );
    }

    let a = filter.pointer_angle().to_radians();
    let hand = egui::vec2(a.cos(), -a.sin()) * (radius - 12.0);
    painter.line_segment(
        [center, center + hand],
        egui::Stroke::new(3.0, style::colors::DIAL_HAND),
    );
    painter.circle_filled(center, 4.0, style::colors::DIAL_HAND);
}

fn paint_linear(painter: &egui::Painter, rect: egui::Rect, filter: &DialFilter) {
    let horizontal = filter.mode() == DialMode::LinearX;
    let track = if filter.is_active() {
        style::colors::DIAL_ACTIVE
    } else {
        style::colors::DIAL_RIM
    };
    painter.rect_filled(rect, 0.0, style::colors::DIAL_FACE);
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, track));

    let half = LINEAR_DIAL_LENGTH * 0.5 - LINEAR_DIAL_THICKNESS * 0.5;
    let offset = filter.drag_offset();
    let knob = if horizontal {
        rect.center() + egui::vec2(offset.x.clamp(-half, half), 0.0)
    } else {
        // Dial space is y-up
        rect.center() + egui::vec2(0.0, (-offset.y).clamp(-half, half))
    };
    painter.circle_filled(knob, LINEAR_DIAL_THICKNESS * 0.35, style::colors::DIAL_HAND);
}

/// Draw the dial panel and collect dial emissions as events
pub fn draw_dial_panel(ctx: &egui::Context, panel: &mut DialPanel, unscaled_dt: f32, actions: &mut UiActions) {
    egui::Window::new("Dials")
        .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
        .title_bar(false)
        .resizable(false)
        .frame(style::universe_window_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new("Month").small().color(style::colors::TEXT_MUTED));
                    let (response, painter) = ui.allocate_painter(
                        egui::vec2(LINEAR_DIAL_THICKNESS, LINEAR_DIAL_LENGTH),
                        egui::Sense::drag(),
                    );
                    if let Some(delta) = interact(&mut panel.y_dial, &response, unscaled_dt) {
                        actions.dial_events.push(panel.event_for(DialMode::LinearY, delta));
                    }
                    paint_linear(&painter, response.rect, &panel.y_dial);
                });

                ui.vertical(|ui| {
                    ui.label(egui::RichText::new("Year").small().color(style::colors::TEXT_MUTED));
                    let (response, painter) = ui.allocate_painter(
                        egui::vec2(ROTARY_DIAL_SIZE, ROTARY_DIAL_SIZE),
                        egui::Sense::drag(),
                    );
                    if let Some(delta) = interact(&mut panel.zoom_dial, &response, unscaled_dt) {
                        actions.dial_events.push(panel.event_for(DialMode::Rotary, delta));
                    }
                    paint_rotary(&painter, response.rect, &panel.zoom_dial);

                    ui.label(egui::RichText::new("Day").small().color(style::colors::TEXT_MUTED));
                    let (response, painter) = ui.allocate_painter(
                        egui::vec2(LINEAR_DIAL_LENGTH, LINEAR_DIAL_THICKNESS),
                        egui::Sense::drag(),
                    );
                    if let Some(delta) = interact(&mut panel.x_dial, &response, unscaled_dt) {
                        actions.dial_events.push(panel.event_for(DialMode::LinearX, delta));
                    }
                    paint_linear(&painter, response.rect, &panel.x_dial);
                });
            });
        });
}
