//! Night-sky egui styling.
//!
//! Flat translucent panels, hard borders, cool blues with a warm accent
//! that matches the location markers.

use egui::epaint::Shadow;
use egui::style::{WidgetVisuals, Widgets};
use egui::{Color32, FontData, FontDefinitions, FontFamily, Frame, Margin, Rounding, Stroke, Style, Visuals};

/// Universe color palette
pub mod colors {
    use egui::Color32;

    // Panel backgrounds
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(10, 12, 24, 230);
    pub const PANEL_BORDER: Color32 = Color32::from_rgb(55, 65, 105);

    // Interactive elements
    pub const BUTTON_BG: Color32 = Color32::from_rgb(20, 24, 44);
    pub const BUTTON_HOVER: Color32 = Color32::from_rgb(32, 38, 68);
    pub const BUTTON_ACTIVE: Color32 = Color32::from_rgb(45, 54, 92);
    pub const BUTTON_BORDER: Color32 = Color32::from_rgb(70, 82, 130);

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(215, 222, 240);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(125, 135, 165);
    pub const TEXT_ACCENT: Color32 = Color32::from_rgb(255, 200, 90);

    // Dials
    pub const DIAL_FACE: Color32 = Color32::from_rgb(16, 20, 38);
    pub const DIAL_RIM: Color32 = Color32::from_rgb(85, 100, 160);
    pub const DIAL_HAND: Color32 = Color32::from_rgb(255, 200, 90);
    pub const DIAL_ACTIVE: Color32 = Color32::from_rgb(140, 200, 255);

    // Selection/Highlight
    pub const SELECTED: Color32 = Color32::from_rgb(50, 70, 120);

    // Location list
    pub const VISITED: Color32 = Color32::from_rgb(95, 100, 120);
}

/// Border width for panels and buttons
pub const BORDER_WIDTH: f32 = 1.0;

pub fn universe_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.window_rounding = Rounding::ZERO;
    visuals.menu_rounding = Rounding::ZERO;

    visuals.window_shadow = Shadow::NONE;
    visuals.popup_shadow = Shadow::NONE;

    visuals.window_fill = colors::PANEL_BG;
    visuals.window_stroke = Stroke::new(BORDER_WIDTH, colors::PANEL_BORDER);

    visuals.panel_fill = colors::PANEL_BG;
    visuals.extreme_bg_color = colors::BUTTON_BG;
    visuals.faint_bg_color = Color32::from_rgb(14, 17, 32);

    visuals.widgets = universe_widgets();

    visuals.selection.bg_fill = colors::SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_ACCENT);

    visuals.override_text_color = Some(colors::TEXT_PRIMARY);

    visuals
}

fn widget(bg: Color32, border: Stroke, fg: Color32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: bg,
        bg_stroke: border,
        rounding: Rounding::ZERO,
        fg_stroke: Stroke::new(1.0, fg),
        expansion: 0.0,
    }
}

fn universe_widgets() -> Widgets {
    Widgets {
        noninteractive: widget(
            colors::PANEL_BG,
            Stroke::new(BORDER_WIDTH, colors::PANEL_BORDER),
            colors::TEXT_MUTED,
        ),
        inactive: widget(
            colors::BUTTON_BG,
            Stroke::new(BORDER_WIDTH, colors::BUTTON_BORDER),
            colors::TEXT_PRIMARY,
        ),
        hovered: widget(
            colors::BUTTON_HOVER,
            Stroke::new(BORDER_WIDTH, colors::TEXT_ACCENT),
            colors::TEXT_PRIMARY,
        ),
        active: widget(
            colors::BUTTON_ACTIVE,
            Stroke::new(2.0, colors::TEXT_ACCENT),
            colors::TEXT_PRIMARY,
        ),
        open: widget(
            colors::BUTTON_ACTIVE,
            Stroke::new(BORDER_WIDTH, colors::BUTTON_BORDER),
            colors::TEXT_PRIMARY,
        ),
    }
}

/// Load Hack monospace font if the system has it
pub fn load_fonts() -> FontDefinitions {
    let mut fonts = FontDefinitions::default();

    if let Ok(font_data) = std::fs::read("/usr/share/fonts/TTF/Hack-Regular.ttf") {
        fonts
            .font_data
            .insert("hack".to_owned(), FontData::from_owned(font_data));

        fonts
            .families
            .entry(FontFamily::Proportional)
            .or_default()
            .insert(0, "hack".to_owned());

        fonts
            .families
            .entry(FontFamily::Monospace)
            .or_default()
            .insert(0, "hack".to_owned());
    } else {
        log::debug!("Hack font not found, using egui defaults");
    }

    fonts
}

pub fn universe_window_frame() -> Frame {
    Frame::none()
        .fill(colors::PANEL_BG)
        .stroke(Stroke::new(BORDER_WIDTH, colors::PANEL_BORDER))
        .inner_margin(Margin::same(8.0))
}

pub fn universe_style() -> Style {
    let mut style = Style::default();
    style.visuals = universe_visuals();
    style.interaction.tooltip_delay = 0.0;
    style.interaction.show_tooltips_only_when_still = false;
    style
}
