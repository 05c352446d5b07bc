//! Browser entry points exported through wasm-bindgen

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::app::MapApp;
use crate::config::SiteConfig;
use crate::core::CountryCatalog;
use crate::field_canvas;

pub use crate::field_canvas::ParticleFieldHandle;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();
}

/// Configuration injected by the host page as `window.__lab_config`, either
/// a JSON string or a plain object. Invalid documents fall back to defaults.
fn site_config() -> SiteConfig {
    let raw = js_sys::eval("window.__lab_config")
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .and_then(|v| match v.as_string() {
            Some(json) => Some(json),
            None => js_sys::JSON::stringify(&v).ok().and_then(|s| s.as_string()),
        });

    let Some(json) = raw else {
        debug!("No injected site config, using defaults");
        return SiteConfig::default();
    };
    match SiteConfig::from_json(&json) {
        Ok(config) => {
            info!("Site config loaded");
            config
        }
        Err(err) => {
            warn!(error = %err, "Invalid site config, using defaults");
            SiteConfig::default()
        }
    }
}

fn canvas_by_id(canvas_id: &str) -> Result<HtmlCanvasElement, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("element {canvas_id:?} is not a canvas")))
}

/// Start the particle background on the canvas with id `canvas_id`.
#[wasm_bindgen]
pub fn mount_particle_field(canvas_id: &str) -> Result<ParticleFieldHandle, JsValue> {
    let canvas = canvas_by_id(canvas_id)?;
    let config = site_config();
    field_canvas::mount(canvas, &config.particles)
}

/// Running world map; `teardown` stops the runner and drops the listeners.
#[wasm_bindgen]
pub struct WorldMapHandle {
    runner: Option<eframe::WebRunner>,
    wheel: Option<EventListener>,
}

#[wasm_bindgen]
impl WorldMapHandle {
    pub fn teardown(&mut self) {
        self.wheel.take();
        if let Some(runner) = self.runner.take() {
            runner.destroy();
            info!("World map unmounted");
        }
    }
}

/// Start the world map widget on the canvas with id `canvas_id`.
#[wasm_bindgen]
pub async fn mount_world_map(canvas_id: String) -> Result<WorldMapHandle, JsValue> {
    let canvas = canvas_by_id(&canvas_id)?;
    let config = site_config();
    // the config was validated, so this only fails for a rejected custom list
    let catalog = config.catalog().unwrap_or_else(|err| {
        warn!(error = %err, "Invalid country list, using built-in catalog");
        CountryCatalog::builtin()
    });
    let flag_base_url = config.map.flag_base_url.clone();

    // keep wheel zoom from scrolling the page
    let wheel = EventListener::new_with_options(
        &canvas,
        "wheel",
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        },
        |event| event.prevent_default(),
    );

    let runner = eframe::WebRunner::new();
    runner
        .start(
            canvas,
            eframe::WebOptions::default(),
            Box::new(move |cc| Ok(Box::new(MapApp::new(cc, catalog, &flag_base_url)))),
        )
        .await?;

    info!(canvas_id = %canvas_id, "World map mounted");
    Ok(WorldMapHandle {
        runner: Some(runner),
        wheel: Some(wheel),
    })
}
