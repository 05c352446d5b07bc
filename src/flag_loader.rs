//! Loads flag images from the icon CDN into egui textures

use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;
use gloo::events::EventListener;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::core::{flag_url, CountryCode, FlagCache};

pub struct FlagLoader {
    base_url: String,
    cache: Rc<RefCell<FlagCache<egui::TextureHandle>>>,
    /// load/error listeners; one pair per requested code, kept for the session
    listeners: Vec<EventListener>,
}

impl FlagLoader {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            cache: Rc::new(RefCell::new(FlagCache::new())),
            listeners: Vec::new(),
        }
    }

    /// Start loading `code` unless it was already requested.
    pub fn request(&mut self, ctx: &egui::Context, code: CountryCode) {
        if !self.cache.borrow_mut().request(code) {
            return;
        }
        if let Err(err) = self.start(ctx, code) {
            warn!(code = %code, error = ?err, "Could not start flag load");
            self.cache.borrow_mut().fail(code);
        }
    }

    pub fn texture(&self, code: CountryCode) -> Option<egui::TextureHandle> {
        self.cache.borrow().get(code).cloned()
    }

    fn start(&mut self, ctx: &egui::Context, code: CountryCode) -> Result<(), JsValue> {
        let img = HtmlImageElement::new()?;
        // pixels are read back through a canvas
        img.set_cross_origin(Some("anonymous"));
        let url = flag_url(&self.base_url, code);

        let on_load = {
            let cache = Rc::clone(&self.cache);
            let ctx = ctx.clone();
            let img_loaded = img.clone();
            EventListener::once(&img, "load", move |_event| {
                match image_to_color_image(&img_loaded) {
                    Ok(image) => {
                        let texture = ctx.load_texture(
                            format!("flag-{code}"),
                            image,
                            egui::TextureOptions::LINEAR,
                        );
                        cache.borrow_mut().resolve(code, texture);
                        debug!(code = %code, "Flag loaded");
                    }
                    Err(err) => {
                        warn!(code = %code, error = ?err, "Flag image unreadable");
                        cache.borrow_mut().fail(code);
                    }
                }
                ctx.request_repaint();
            })
        };

        let on_error = {
            let cache = Rc::clone(&self.cache);
            let ctx = ctx.clone();
            let url = url.clone();
            EventListener::once(&img, "error", move |_event| {
                warn!(code = %code, url = %url, "Flag image failed to load");
                cache.borrow_mut().fail(code);
                ctx.request_repaint();
            })
        };

        img.set_src(&url);
        self.listeners.push(on_load);
        self.listeners.push(on_error);
        Ok(())
    }
}

fn image_to_color_image(image: &HtmlImageElement) -> Result<egui::ColorImage, JsValue> {
    let width = image.natural_width();
    let height = image.natural_height();
    if width == 0 || height == 0 {
        return Err(JsValue::from_str("empty image"));
    }
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.draw_image_with_html_image_element(image, 0.0, 0.0)?;
    let data = ctx.get_image_data(0.0, 0.0, width as f64, height as f64)?;
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        &data.data(),
    ))
}
