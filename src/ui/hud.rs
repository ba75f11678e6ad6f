//! Date readout, location list and toasts.

use super::style;
use super::Toast;
use crate::locations::DateLabel;
use crate::motion::UniverseCoordinate;
use crate::simulation::Universe;

pub struct LocationRow {
    pub name: String,
    pub date: String,
    pub visited: bool,
}

/// Data needed to render the HUD
pub struct HudData {
    pub date: String,
    pub coordinate: UniverseCoordinate,
    pub locations: Vec<LocationRow>,
    pub visited_count: usize,
    /// Free to move (no visit running or waiting)
    pub exploring: bool,
    pub fading: bool,
    /// Visits waiting behind the current one
    pub pending_visits: usize,
}

impl HudData {
    pub fn from_universe(universe: &Universe) -> Self {
        let settings = universe.controller.settings();
        let locations = universe
            .locations
            .iter()
            .map(|loc| {
                let c = loc.coordinate;
                LocationRow {
                    name: loc.name.clone(),
                    date: DateLabel::for_coordinate(UniverseCoordinate::new(c.x, c.y, c.z), settings).to_string(),
                    visited: loc.is_visited(),
                }
            })
            .collect();

        Self {
            date: universe.date().to_string(),
            coordinate: universe.coordinate(),
            locations,
            visited_count: universe.locations.visited_count(),
            exploring: universe.gate.is_idle(),
            fading: universe.gate.is_fading(),
            pending_visits: universe.gate.pending_len(),
        }
    }
}

pub fn draw_hud(ctx: &egui::Context, data: &HudData) {
    egui::Window::new("Date")
        .fixed_pos([10.0, 10.0])
        .title_bar(false)
        .resizable(false)
        .frame(style::universe_window_frame())
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(&data.date)
                    .size(22.0)
                    .color(style::colors::TEXT_ACCENT),
            );
            ui.label(
                egui::RichText::new(format!(
                    "x {:+.2}  y {:+.2}  zoom {:.2}",
                    data.coordinate.x, data.coordinate.y, data.coordinate.zoom_size
                ))
                .color(style::colors::TEXT_MUTED)
                .small(),
            );

            if !data.exploring {
                let status = if data.fading { "Travelling..." } else { "Visiting" };
                ui.label(egui::RichText::new(status).color(style::colors::TEXT_MUTED));
                if data.pending_visits > 0 {
                    ui.label(
                        egui::RichText::new(format!("{} more waiting", data.pending_visits))
                            .color(style::colors::TEXT_MUTED)
                            .small(),
                    );
                }
            }

            ui.separator();
            ui.label(format!(
                "Locations {}/{}",
                data.visited_count,
                data.locations.len()
            ));
            for row in &data.locations {
                let text = egui::RichText::new(format!("{}  ({})", row.name, row.date));
                let text = if row.visited {
                    text.strikethrough().color(style::colors::VISITED)
                } else {
                    text
                };
                ui.label(text);
            }
        });
}

pub fn draw_toasts(ctx: &egui::Context, toasts: &[Toast]) {
    if toasts.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::CENTER_TOP, [0.0, 20.0])
        .interactable(false)
        .show(ctx, |ui| {
            for toast in toasts {
                // Fade out over the last second
                let alpha = toast.remaining.clamp(0.0, 1.0);
                ui.label(
                    egui::RichText::new(&toast.text)
                        .size(20.0)
                        .color(style::colors::TEXT_ACCENT.gamma_multiply(alpha)),
                );
            }
        });
}
