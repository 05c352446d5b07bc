//! Pan/zoom view transform for the world map
//!
//! The 800x400 map content box is first fitted into the on-screen viewport
//! (centered, aspect preserved), then `translate(pan) scale(zoom)` is applied
//! around the viewport center. All operations are pure state updates; the
//! clamp silently absorbs out-of-range requests.

use super::geometry::Point;

/// Width of the map content box
pub const MAP_WIDTH: f32 = 800.0;
/// Height of the map content box
pub const MAP_HEIGHT: f32 = 400.0;
pub const CONTENT_CENTER: Point = Point::new(MAP_WIDTH * 0.5, MAP_HEIGHT * 0.5);

pub const MIN_ZOOM: f32 = 0.3;
pub const MAX_ZOOM: f32 = 3.0;
pub const DEFAULT_ZOOM: f32 = 1.0;
/// Zoom change per button press
pub const ZOOM_STEP: f32 = 0.2;
/// Zoom change per unit of wheel delta (DOM `deltaY` convention)
pub const WHEEL_ZOOM_FACTOR: f32 = 0.001;

#[inline]
pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_nan() {
        return DEFAULT_ZOOM;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Drag gesture state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// `anchor` = pointer position at drag start minus the pan offset then
    Dragging { anchor: Point },
}

/// On-screen rectangle the content box is fitted into
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub min: Point,
    pub size: Point,
}

impl Viewport {
    pub fn new(min: Point, size: Point) -> Self {
        Self { min, size }
    }

    pub fn center(&self) -> Point {
        self.min + self.size * 0.5
    }

    /// Content-to-screen scale before zoom ("meet" fit)
    pub fn fit_scale(&self) -> f32 {
        (self.size.x / MAP_WIDTH).min(self.size.y / MAP_HEIGHT).max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    zoom: f32,
    pan: Point,
    drag: DragState,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan: Point::ZERO,
            drag: DragState::Idle,
        }
    }
}

impl ViewTransform {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Zoom as a rounded percentage for the scale indicator
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn zoom_in(&mut self) {
        self.zoom = clamp_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = clamp_zoom(self.zoom - ZOOM_STEP);
    }

    /// Apply a wheel delta; negative (wheel up) zooms in.
    pub fn zoom_by_wheel(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.zoom = clamp_zoom(self.zoom - delta * WHEEL_ZOOM_FACTOR);
    }

    /// Start panning, unless the pointer went down on a marker.
    ///
    /// Returns whether a drag started.
    pub fn begin_drag(&mut self, pointer: Point, over_marker: bool) -> bool {
        if over_marker {
            return false;
        }
        self.drag = DragState::Dragging {
            anchor: pointer - self.pan,
        };
        true
    }

    pub fn drag_move(&mut self, pointer: Point) {
        if let DragState::Dragging { anchor } = self.drag {
            self.pan = pointer - anchor;
        }
    }

    /// Pointer released or left the widget
    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn reset_view(&mut self) {
        self.zoom = DEFAULT_ZOOM;
        self.pan = Point::ZERO;
    }

    /// Total content-to-screen scale (fit times zoom)
    pub fn scale(&self, viewport: &Viewport) -> f32 {
        viewport.fit_scale() * self.zoom
    }

    pub fn content_to_screen(&self, content: Point, viewport: &Viewport) -> Point {
        viewport.center() + self.pan + (content - CONTENT_CENTER) * self.scale(viewport)
    }

    /// Inverse of [`Self::content_to_screen`]; None for a collapsed viewport.
    pub fn screen_to_content(&self, screen: Point, viewport: &Viewport) -> Option<Point> {
        let scale = self.scale(viewport);
        if scale <= 0.0 {
            return None;
        }
        Some(CONTENT_CENTER + (screen - viewport.center() - self.pan) / scale)
    }
}
