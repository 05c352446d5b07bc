//! Dark slate theme matching the lab site

use egui::Color32;

/// Slate palette with a single blue accent
pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_PAGE: Color32 = Color32::from_rgb(10, 25, 47);           // #0A192F - page / hero
    pub const BG_OCEAN: Color32 = Color32::from_rgb(15, 23, 42);          // #0F172A - map ocean
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(30, 41, 59);       // #1E293B - cards, land
    pub const BG_HOVER: Color32 = Color32::from_rgb(51, 65, 85);          // #334155 - hover states

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);   // #FFFFFF
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 163, 184); // #94A3B8 - labels, title
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 116, 139);     // #64748B - hints

    // === Lines & Borders ===
    pub const BORDER: Color32 = Color32::from_rgb(51, 65, 85);            // #334155 - land stroke

    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);          // #3B82F6

    // === Section headings / hint dots ===
    pub const CYAN: Color32 = Color32::from_rgb(34, 211, 238);            // #22D3EE
    pub const GREEN: Color32 = Color32::from_rgb(74, 222, 128);           // #4ADE80
    pub const PURPLE: Color32 = Color32::from_rgb(192, 132, 252);         // #C084FC

    /// Continents are drawn at this fraction of full opacity
    pub const LAND_OPACITY: f32 = 0.4;
    /// Grid lines opacity
    pub const GRID_OPACITY: f32 = 0.3;
}

pub fn site_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BG_PAGE;
    visuals.window_fill = BG_ELEVATED;
    visuals.extreme_bg_color = BG_OCEAN;
    visuals.faint_bg_color = BG_ELEVATED;

    visuals.override_text_color = Some(TEXT_PRIMARY);

    visuals.widgets.noninteractive.bg_fill = BG_PAGE;
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    visuals.widgets.inactive.bg_fill = BG_ELEVATED;
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, BORDER);
    visuals.widgets.inactive.weak_bg_fill = BG_ELEVATED;

    visuals.widgets.hovered.bg_fill = BG_HOVER;
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.weak_bg_fill = BG_HOVER;

    visuals.widgets.active.bg_fill = BG_HOVER;
    visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, ACCENT);
    visuals.widgets.active.weak_bg_fill = BG_HOVER;

    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.35);
    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);

    visuals.hyperlink_color = ACCENT;

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}

/// Core color to egui color
pub fn rgb(color: crate::core::Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}
