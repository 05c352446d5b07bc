//! Map canvas: background, markers, pointer handling and overlays

use eframe::egui;
use tracing::debug;

use crate::core::countries::{MARKER_DOT_RADIUS, MARKER_HALO_RADIUS};
use crate::core::view::{MAP_HEIGHT, MAP_WIDTH};
use crate::core::{Country, Point, Viewport};
use crate::theme::{self, colors};
use super::{to_point, to_pos, MapApp};

const GRID_SPACING: f32 = 50.0;
const GRID_COLUMNS: usize = 16;
const GRID_ROWS: usize = 8;
/// Length of the dashed connector above a hovered marker
const CALLOUT_RISE: f32 = 35.0;
const LABEL_HALF_WIDTH: f32 = 40.0;
const LABEL_TOP: f32 = 50.0;
const LABEL_BOTTOM: f32 = 30.0;
const HALO_ALPHA: f32 = 0.4;
/// Flag image size in content units
const FLAG_SIZE: egui::Vec2 = egui::vec2(14.0, 10.0);
const HINTS_HEIGHT: f32 = 28.0;

const HINTS: [(egui::Color32, &str); 3] = [
    (colors::CYAN, "Click and drag to pan"),
    (colors::GREEN, "Scroll to zoom"),
    (colors::PURPLE, "Click flags for details"),
];

impl MapApp {
    pub(crate) fn render_map(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let size = egui::vec2(available.x, (available.y - HINTS_HEIGHT).max(0.0));
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let rect = response.rect;
        let viewport = Viewport::new(
            to_point(rect.min),
            Point::new(rect.width(), rect.height()),
        );

        self.handle_pointer(ui, &response, &viewport);
        self.paint_map(&painter, rect, &viewport);
        self.draw_zoom_controls(ui.ctx(), rect);
        self.draw_scale_indicator(ui.ctx(), rect);
        render_hints(ui);
    }

    fn handle_pointer(&mut self, ui: &egui::Ui, response: &egui::Response, viewport: &Viewport) {
        let (pressed, released, latest, scroll) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
                i.raw_scroll_delta.y,
            )
        });

        match latest.filter(|pos| response.rect.contains(*pos)) {
            Some(pos) => {
                let pos = to_point(pos);
                // overlays on top of the map swallow presses
                if pressed && response.hovered() {
                    self.map.pointer_down(&self.catalog, pos, viewport);
                }
                self.map.pointer_move(&self.catalog, pos, viewport);
            }
            None => self.map.pointer_leave(),
        }
        if released {
            self.map.pointer_up();
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.map.click(&self.catalog, to_point(pos), viewport);
            }
        }

        // egui scroll is positive upward; the view expects DOM deltaY
        if response.hovered() && scroll != 0.0 {
            self.map.view.zoom_by_wheel(-scroll);
        }

        let cursor = if self.map.view.is_dragging() {
            Some(egui::CursorIcon::Grabbing)
        } else if self.map.hovered().is_some() {
            Some(egui::CursorIcon::PointingHand)
        } else if response.hovered() {
            Some(egui::CursorIcon::Grab)
        } else {
            None
        };
        if let Some(cursor) = cursor {
            ui.ctx().set_cursor_icon(cursor);
        }
    }

    fn paint_map(&self, painter: &egui::Painter, rect: egui::Rect, viewport: &Viewport) {
        painter.rect_filled(rect, 8.0, colors::BG_ELEVATED);

        let view = &self.map.view;
        let scale = view.scale(viewport);
        if scale <= 0.0 {
            return;
        }
        let to_screen = |p: Point| to_pos(view.content_to_screen(p, viewport));

        let ocean = egui::Rect::from_two_pos(
            to_screen(Point::ZERO),
            to_screen(Point::new(MAP_WIDTH, MAP_HEIGHT)),
        );
        painter.rect_filled(ocean, 0.0, colors::BG_OCEAN);

        let land_fill = colors::BG_ELEVATED.gamma_multiply(colors::LAND_OPACITY);
        let land_stroke =
            egui::Stroke::new(scale, colors::BORDER.gamma_multiply(colors::LAND_OPACITY));
        for outline in &self.land {
            let points = outline.iter().map(|p| to_screen(*p)).collect();
            painter.add(egui::Shape::convex_polygon(points, land_fill, land_stroke));
        }

        let grid = egui::Stroke::new(
            0.5 * scale,
            colors::BG_ELEVATED.gamma_multiply(colors::GRID_OPACITY),
        );
        for i in 0..GRID_COLUMNS {
            let x = i as f32 * GRID_SPACING;
            painter.line_segment(
                [to_screen(Point::new(x, 0.0)), to_screen(Point::new(x, MAP_HEIGHT))],
                grid,
            );
        }
        for i in 0..GRID_ROWS {
            let y = i as f32 * GRID_SPACING;
            painter.line_segment(
                [to_screen(Point::new(0.0, y)), to_screen(Point::new(MAP_WIDTH, y))],
                grid,
            );
        }

        let hovered = self.map.hovered();
        for country in self.catalog.iter() {
            let is_hovered = hovered == Some(country.id.as_str());
            self.paint_marker(painter, country, is_hovered, scale, to_screen(country.position));
        }
        // callout last so neighbouring markers never cover it
        if let Some(country) = hovered.and_then(|id| self.catalog.get(id)) {
            paint_callout(painter, country, scale, &to_screen);
        }

        painter.text(
            to_screen(Point::new(MAP_WIDTH * 0.5, 30.0)),
            egui::Align2::CENTER_CENTER,
            "WORLD MAP",
            egui::FontId::proportional(16.0 * scale),
            colors::TEXT_SECONDARY,
        );
    }

    fn paint_marker(
        &self,
        painter: &egui::Painter,
        country: &Country,
        hovered: bool,
        scale: f32,
        center: egui::Pos2,
    ) {
        let color = theme::rgb(country.color);
        painter.circle_filled(center, MARKER_HALO_RADIUS * scale, color.gamma_multiply(HALO_ALPHA));

        let dot = if hovered { MARKER_HALO_RADIUS } else { MARKER_DOT_RADIUS };
        painter.circle(
            center,
            dot * scale,
            color,
            egui::Stroke::new(2.0 * scale, colors::BG_OCEAN),
        );

        match self.flags.texture(country.code) {
            Some(texture) => {
                painter.image(
                    texture.id(),
                    egui::Rect::from_center_size(center, FLAG_SIZE * scale),
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                painter.text(
                    center,
                    egui::Align2::CENTER_CENTER,
                    country.code.as_str(),
                    egui::FontId::monospace(5.0 * scale),
                    colors::TEXT_PRIMARY,
                );
            }
        }
    }

    fn draw_zoom_controls(&mut self, ctx: &egui::Context, rect: egui::Rect) {
        egui::Area::new(egui::Id::new("zoom_controls"))
            .order(egui::Order::Foreground)
            .fixed_pos(rect.right_top() + egui::vec2(-12.0, 12.0))
            .pivot(egui::Align2::RIGHT_TOP)
            .show(ctx, |ui| {
                overlay_frame().show(ui, |ui| {
                    ui.vertical(|ui| {
                        let view = &mut self.map.view;
                        if zoom_button(ui, "+", "Zoom In").clicked() {
                            view.zoom_in();
                            debug!(zoom = view.zoom(), "Zoom in");
                        }
                        if zoom_button(ui, "−", "Zoom Out").clicked() {
                            view.zoom_out();
                            debug!(zoom = view.zoom(), "Zoom out");
                        }
                        if zoom_button(ui, "↺", "Reset View").clicked() {
                            view.reset_view();
                            debug!("View reset");
                        }
                    });
                });
            });
    }

    fn draw_scale_indicator(&self, ctx: &egui::Context, rect: egui::Rect) {
        egui::Area::new(egui::Id::new("scale_indicator"))
            .order(egui::Order::Foreground)
            .interactable(false)
            .fixed_pos(rect.left_bottom() + egui::vec2(12.0, -12.0))
            .pivot(egui::Align2::LEFT_BOTTOM)
            .show(ctx, |ui| {
                overlay_frame().show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(format!("Scale: {}%", self.map.view.zoom_percent()))
                            .color(colors::TEXT_PRIMARY),
                    );
                });
            });
    }
}

fn paint_callout(
    painter: &egui::Painter,
    country: &Country,
    scale: f32,
    to_screen: &impl Fn(Point) -> egui::Pos2,
) {
    let color = theme::rgb(country.color);
    let anchor = country.position;

    painter.extend(egui::Shape::dashed_line(
        &[to_screen(anchor), to_screen(anchor - Point::new(0.0, CALLOUT_RISE))],
        egui::Stroke::new(scale, color),
        4.0 * scale,
        4.0 * scale,
    ));

    let label = egui::Rect::from_min_max(
        to_screen(anchor + Point::new(-LABEL_HALF_WIDTH, -LABEL_TOP)),
        to_screen(anchor + Point::new(LABEL_HALF_WIDTH, -LABEL_BOTTOM)),
    );
    painter.rect_filled(label, 4.0 * scale, color);
    painter.text(
        label.center(),
        egui::Align2::CENTER_CENTER,
        &country.name,
        egui::FontId::proportional(10.0 * scale),
        colors::TEXT_PRIMARY,
    );
}

fn overlay_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(egui::Color32::from_rgba_unmultiplied(30, 41, 59, 230))
        .stroke(egui::Stroke::new(1.0, colors::BORDER))
        .corner_radius(8.0)
        .inner_margin(8.0)
}

fn zoom_button(ui: &mut egui::Ui, glyph: &str, tooltip: &str) -> egui::Response {
    ui.add_sized(
        egui::vec2(32.0, 32.0),
        egui::Button::new(egui::RichText::new(glyph).size(18.0)),
    )
    .on_hover_text(tooltip)
}

fn render_hints(ui: &mut egui::Ui) {
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        for (color, text) in HINTS {
            let (dot, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
            ui.painter().circle_filled(dot.center(), 5.0, color);
            ui.label(egui::RichText::new(text).color(colors::TEXT_SECONDARY));
            ui.add_space(12.0);
        }
    });
}
