//! Side panel: selected-country details, featured list, map statistics

use eframe::egui;

use crate::core::Country;
use crate::theme::{self, colors};
use super::MapApp;

const PLACEHOLDER: &str = "Click on any country flag to see detailed information";

impl MapApp {
    pub(crate) fn render_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("country_panel")
            .default_width(300.0)
            .min_width(240.0)
            .resizable(true)
            .frame(egui::Frame::new().fill(colors::BG_PAGE).inner_margin(8.0))
            .show(ctx, |ui| {
                let group_frame = egui::Frame::new()
                    .fill(colors::BG_ELEVATED)
                    .stroke(egui::Stroke::new(1.0, colors::BORDER))
                    .corner_radius(8.0)
                    .inner_margin(10.0);

                egui::ScrollArea::vertical().show(ui, |ui| {
                    group_frame.show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        self.render_details(ui);
                    });

                    ui.add_space(8.0);

                    group_frame.show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        self.render_featured(ui);
                    });

                    ui.add_space(8.0);

                    group_frame.show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        self.render_statistics(ui);
                    });
                });
            });
    }

    fn render_details(&self, ui: &mut egui::Ui) {
        let selected = self.map.selected(&self.catalog);
        let title = if selected.is_some() {
            "Country Details"
        } else {
            "Select a Country"
        };
        ui.label(egui::RichText::new(title).color(colors::CYAN).size(16.0).strong());
        ui.add_space(6.0);

        let Some(country) = selected else {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.label(egui::RichText::new(PLACEHOLDER).color(colors::TEXT_SECONDARY));
                ui.add_space(16.0);
            });
            return;
        };

        ui.horizontal(|ui| {
            self.flag_icon(ui, country, egui::vec2(40.0, 30.0));
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&country.name).size(18.0).strong());
                ui.label(egui::RichText::new(&country.continent).color(colors::TEXT_SECONDARY));
            });
        });

        ui.add_space(8.0);
        egui::Grid::new("country_facts")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for (label, value) in [
                    ("CAPITAL", &country.capital),
                    ("POPULATION", &country.population),
                    ("AREA", &country.area),
                    ("LANGUAGE", &country.language),
                ] {
                    ui.label(egui::RichText::new(label).color(colors::TEXT_SECONDARY).small());
                    ui.label(egui::RichText::new(value.as_str()).strong());
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.label(
            egui::RichText::new("COUNTRY COLOR")
                .color(colors::TEXT_SECONDARY)
                .small(),
        );
        ui.horizontal(|ui| {
            let (swatch, _) = ui.allocate_exact_size(egui::vec2(24.0, 24.0), egui::Sense::hover());
            ui.painter().rect(
                swatch,
                4.0,
                theme::rgb(country.color),
                egui::Stroke::new(2.0, colors::BORDER),
                egui::StrokeKind::Inside,
            );
            ui.label(egui::RichText::new(country.color.to_string()).monospace());
        });
    }

    fn render_featured(&mut self, ui: &mut egui::Ui) {
        ui.label(
            egui::RichText::new("Featured Countries")
                .color(colors::GREEN)
                .size(16.0)
                .strong(),
        );
        ui.add_space(6.0);

        let mut clicked = None;
        for country in self.catalog.iter() {
            let selected = self.map.selection().is_selected(&country.id);
            ui.horizontal(|ui| {
                self.flag_icon(ui, country, egui::vec2(20.0, 15.0));
                let row = ui
                    .selectable_label(selected, egui::RichText::new(&country.name))
                    .on_hover_text(&country.continent);
                if row.clicked() {
                    clicked = Some(country.id.clone());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (dot, _) =
                        ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(dot.center(), 5.0, theme::rgb(country.color));
                });
            });
        }

        if let Some(id) = clicked {
            self.map.select_marker(&self.catalog, &id);
        }
    }

    fn render_statistics(&self, ui: &mut egui::Ui) {
        ui.label(
            egui::RichText::new("Map Statistics")
                .color(colors::PURPLE)
                .size(16.0)
                .strong(),
        );
        ui.add_space(6.0);

        egui::Grid::new("map_statistics")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                let rows = [
                    ("Countries Displayed:", self.catalog.len().to_string()),
                    (
                        "Continents Covered:",
                        self.catalog.continents().len().to_string(),
                    ),
                    (
                        "Current Zoom:",
                        format!("{}%", self.map.view.zoom_percent()),
                    ),
                ];
                for (label, value) in rows {
                    ui.label(egui::RichText::new(label).color(colors::TEXT_SECONDARY));
                    ui.label(egui::RichText::new(value).strong());
                    ui.end_row();
                }
            });
    }

    /// Flag image, or the two-letter code while it is loading or failed
    fn flag_icon(&self, ui: &mut egui::Ui, country: &Country, size: egui::Vec2) {
        match self.flags.texture(country.code) {
            Some(texture) => {
                ui.add(egui::Image::new(egui::load::SizedTexture::new(
                    texture.id(),
                    size,
                )));
            }
            None => {
                ui.add_sized(
                    size,
                    egui::Label::new(
                        egui::RichText::new(country.code.as_str())
                            .monospace()
                            .color(colors::TEXT_MUTED),
                    ),
                );
            }
        }
    }
}
