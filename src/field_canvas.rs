//! Particle field on a plain 2D canvas, driven by requestAnimationFrame

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::ParticleSettings;
use crate::core::{Bounds, ParticleField, Point, Rgba, Surface};
use crate::time::{now_seconds, Throttle};

/// Seconds between stats log lines
const STATS_PERIOD: f64 = 5.0;

/// [`Surface`] over a browser 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn fade(&mut self, tint: Rgba, bounds: Bounds) {
        self.ctx.set_fill_style_str(&tint.css());
        self.ctx
            .fill_rect(0.0, 0.0, bounds.width as f64, bounds.height as f64);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.ctx.begin_path();
        // arc only fails for a negative radius
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.stroke();
    }
}

struct FieldLoop {
    canvas: HtmlCanvasElement,
    field: ParticleField,
    surface: CanvasSurface,
    frame: Option<AnimationFrame>,
    stats: Throttle,
    links_since_log: usize,
    respawned_since_log: usize,
}

impl FieldLoop {
    /// Match the backing store to the element's layout size.
    fn sync_size(&mut self) {
        let width = self.canvas.offset_width();
        let height = self.canvas.offset_height();
        if width <= 0 || height <= 0 {
            return;
        }
        if self.canvas.width() != width as u32 || self.canvas.height() != height as u32 {
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
        }
        if self.field.resize(width as f32, height as f32) {
            debug!(width, height, "Particle canvas resized");
        }
    }

    fn tick(&mut self) {
        let stats = self.field.advance_and_render(&mut self.surface);
        self.links_since_log += stats.links;
        self.respawned_since_log += stats.respawned;

        if self.stats.ready(now_seconds()) {
            debug!(
                ticks = self.field.ticks(),
                particles = stats.circles,
                links = self.links_since_log,
                respawned = self.respawned_since_log,
                "Particle field stats"
            );
            self.links_since_log = 0;
            self.respawned_since_log = 0;
        }
    }
}

fn schedule(state: &Rc<RefCell<FieldLoop>>) {
    let weak: Weak<RefCell<FieldLoop>> = Rc::downgrade(state);
    let handle = request_animation_frame(move |_timestamp| {
        // torn down between scheduling and firing
        let Some(state) = weak.upgrade() else {
            return;
        };
        {
            let mut state = state.borrow_mut();
            state.frame.take();
            state.tick();
        }
        schedule(&state);
    });
    state.borrow_mut().frame = Some(handle);
}

/// Returned to the host page; dropping it or calling `teardown` stops the loop.
#[wasm_bindgen]
pub struct ParticleFieldHandle {
    state: Option<Rc<RefCell<FieldLoop>>>,
    resize: Option<EventListener>,
}

#[wasm_bindgen]
impl ParticleFieldHandle {
    /// Cancel the pending frame and remove the resize listener.
    pub fn teardown(&mut self) {
        self.resize.take();
        if let Some(state) = self.state.take() {
            state.borrow_mut().frame.take();
            info!("Particle field unmounted");
        }
    }
}

pub fn mount(
    canvas: HtmlCanvasElement,
    settings: &ParticleSettings,
) -> Result<ParticleFieldHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let surface = CanvasSurface::new(&canvas)?;

    let width = canvas.offset_width().max(canvas.width() as i32).max(0);
    let height = canvas.offset_height().max(canvas.height() as i32).max(0);
    let field = ParticleField::new(
        settings.pool_size,
        Bounds::new(width as f32, height as f32),
        settings.seed,
    );

    let state = Rc::new(RefCell::new(FieldLoop {
        canvas,
        field,
        surface,
        frame: None,
        stats: Throttle::new(STATS_PERIOD),
        links_since_log: 0,
        respawned_since_log: 0,
    }));
    state.borrow_mut().sync_size();

    let weak = Rc::downgrade(&state);
    let resize = EventListener::new(&window, "resize", move |_event| {
        if let Some(state) = weak.upgrade() {
            state.borrow_mut().sync_size();
        }
    });

    schedule(&state);
    info!(
        pool_size = settings.pool_size,
        width, height, "Particle field mounted"
    );

    Ok(ParticleFieldHandle {
        state: Some(state),
        resize: Some(resize),
    })
}
