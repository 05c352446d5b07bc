//! World map widget
//!
//! An eframe app mounted on its own canvas: the pannable map in the central
//! panel and the country details in a right side panel. All interaction
//! state lives in [`MapState`]; this module only converts egui input and
//! paints.

mod map;
mod panel;

use eframe::egui;
use tracing::{info, warn};

use crate::core::outline::SAMPLES_PER_SEGMENT;
use crate::core::{world_outlines, CountryCatalog, MapState, Point};
use crate::flag_loader::FlagLoader;
use crate::theme::{colors, site_visuals};

pub struct MapApp {
    catalog: CountryCatalog,
    /// Continent outlines flattened to content-space polylines
    land: Vec<Vec<Point>>,
    map: MapState,
    flags: FlagLoader,
}

impl MapApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        catalog: CountryCatalog,
        flag_base_url: &str,
    ) -> Self {
        cc.egui_ctx.set_visuals(site_visuals());

        let land = match world_outlines() {
            Ok(continents) => continents
                .iter()
                .flat_map(|c| c.paths.iter().map(|p| p.sample(SAMPLES_PER_SEGMENT)))
                .collect(),
            Err(err) => {
                warn!(error = %err, "Continent outlines unavailable");
                Vec::new()
            }
        };

        let mut flags = FlagLoader::new(flag_base_url);
        for country in catalog.iter() {
            flags.request(&cc.egui_ctx, country.code);
        }

        info!(
            countries = catalog.len(),
            outlines = land.len(),
            flag_base_url,
            "World map ready"
        );

        Self {
            catalog,
            land,
            map: MapState::new(),
            flags,
        }
    }
}

impl eframe::App for MapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // side panel must be shown before the central panel
        self.render_panel(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PAGE).inner_margin(8.0))
            .show(ctx, |ui| {
                self.render_map(ui);
            });
    }
}

#[inline]
fn to_pos(p: Point) -> egui::Pos2 {
    egui::pos2(p.x, p.y)
}

#[inline]
fn to_point(p: egui::Pos2) -> Point {
    Point::new(p.x, p.y)
}
