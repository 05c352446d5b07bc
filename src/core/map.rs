//! Interaction state of the world map widget
//!
//! Pointer events arrive in screen space and are mapped into content space
//! before hit-testing, so marker hit areas are independent of zoom and pan.

use tracing::{debug, trace, warn};

use super::countries::{Country, CountryCatalog};
use super::geometry::Point;
use super::view::{ViewTransform, Viewport};

/// Currently selected country id; at most one, last write wins
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection(Option<String>);

impl Selection {
    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.0.as_deref() == Some(id)
    }

    /// Replace the selection. Returns true if it changed.
    pub fn set(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            return false;
        }
        self.0 = Some(id.to_string());
        true
    }
}

/// What a primary press did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// Pan drag started
    Dragging,
    /// Pressed on a marker; pan untouched
    OnMarker,
    /// Viewport collapsed, nothing hit-testable
    Ignored,
}

/// View transform plus selection and hover, for one mount session
#[derive(Clone, Debug, Default)]
pub struct MapState {
    pub view: ViewTransform,
    selection: Selection,
    hovered: Option<String>,
}

impl MapState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Selected country, if the id still resolves in `catalog`
    pub fn selected<'a>(&self, catalog: &'a CountryCatalog) -> Option<&'a Country> {
        self.selection.id().and_then(|id| catalog.get(id))
    }

    /// Select by id. Unknown ids leave the selection unchanged.
    ///
    /// Pan and zoom are never touched.
    pub fn select_marker(&mut self, catalog: &CountryCatalog, id: &str) -> bool {
        if !catalog.contains(id) {
            warn!(id, "Ignoring selection of unknown country");
            return false;
        }
        let changed = self.selection.set(id);
        if changed {
            debug!(id, "Country selected");
        }
        changed
    }

    /// Marker under a screen-space point
    pub fn marker_under<'a>(
        &self,
        catalog: &'a CountryCatalog,
        screen: Point,
        viewport: &Viewport,
    ) -> Option<&'a Country> {
        let content = self.view.screen_to_content(screen, viewport)?;
        catalog.marker_at(content)
    }

    pub fn pointer_down(
        &mut self,
        catalog: &CountryCatalog,
        screen: Point,
        viewport: &Viewport,
    ) -> PressOutcome {
        if self.view.screen_to_content(screen, viewport).is_none() {
            return PressOutcome::Ignored;
        }
        let over_marker = self.marker_under(catalog, screen, viewport).is_some();
        if self.view.begin_drag(screen, over_marker) {
            trace!(x = screen.x, y = screen.y, "Map drag started");
            PressOutcome::Dragging
        } else {
            PressOutcome::OnMarker
        }
    }

    /// Pointer moved: update the drag and the hovered marker.
    pub fn pointer_move(&mut self, catalog: &CountryCatalog, screen: Point, viewport: &Viewport) {
        self.view.drag_move(screen);
        self.hovered = self
            .marker_under(catalog, screen, viewport)
            .map(|c| c.id.clone());
    }

    pub fn pointer_up(&mut self) {
        self.view.end_drag();
    }

    pub fn pointer_leave(&mut self) {
        self.view.end_drag();
        self.hovered = None;
    }

    /// Click at a screen point; selects the marker under it, if any.
    pub fn click(&mut self, catalog: &CountryCatalog, screen: Point, viewport: &Viewport) -> bool {
        match self.marker_under(catalog, screen, viewport) {
            Some(country) => {
                let id = country.id.clone();
                self.select_marker(catalog, &id)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::CONTENT_CENTER;

    fn viewport() -> Viewport {
        Viewport::new(Point::ZERO, Point::new(800.0, 400.0))
    }

    #[test]
    fn last_selection_wins() {
        let catalog = CountryCatalog::builtin();
        let mut map = MapState::new();
        assert!(map.select_marker(&catalog, "france"));
        assert!(map.select_marker(&catalog, "usa"));
        assert_eq!(map.selection().id(), Some("usa"));
        assert!(!map.selection().is_selected("france"));
        assert_eq!(map.selected(&catalog).unwrap().name, "United States");
        // reselecting is not a change
        assert!(!map.select_marker(&catalog, "usa"));
    }

    #[test]
    fn unknown_id_keeps_selection() {
        let catalog = CountryCatalog::builtin();
        let mut map = MapState::new();
        assert!(!map.select_marker(&catalog, "atlantis"));
        assert_eq!(map.selection().id(), None);
        map.select_marker(&catalog, "algeria");
        assert!(!map.select_marker(&catalog, "atlantis"));
        assert_eq!(map.selection().id(), Some("algeria"));
    }

    #[test]
    fn selection_leaves_view_alone() {
        let catalog = CountryCatalog::builtin();
        let mut map = MapState::new();
        map.view.zoom_in();
        map.view.begin_drag(Point::ZERO, false);
        map.view.drag_move(Point::new(9.0, 4.0));
        map.view.end_drag();
        let before = map.view;
        map.select_marker(&catalog, "south-korea");
        assert_eq!(map.view, before);
    }

    #[test]
    fn drag_starting_on_marker_never_pans() {
        let catalog = CountryCatalog::builtin();
        let mut map = MapState::new();
        let vp = viewport();
        let usa = map.view.content_to_screen(Point::new(180.0, 160.0), &vp);

        assert_eq!(map.pointer_down(&catalog, usa, &vp), PressOutcome::OnMarker);
        map.pointer_move(&catalog, usa + Point::new(120.0, 40.0), &vp);
        map.pointer_up();
        assert_eq!(map.view.pan(), Point::ZERO);
    }

    #[test]
    fn drag_on_background_pans() {
        let catalog = CountryCatalog::builtin();
        let mut map = MapState::new();
        let vp = viewport();
        let ocean = Point::new(20.0, 380.0);

        assert_eq!(map.pointer_down(&catalog, ocean, &vp), PressOutcome::Dragging);
        map.pointer_move(&catalog, ocean + Point::new(-30.0, 10.0), &vp);
        assert_eq!(map.view.pan(), Point::new(-30.0, 10.0));
        map.pointer_leave();
        assert!(!map.view.is_dragging());
        map.pointer_move(&catalog, Point::new(0.0, 0.0), &vp);
        assert_eq!(map.view.pan(), Point::new(-30.0, 10.0));
    }

    #[test]
    fn clicks_hit_markers_at_any_zoom() {
        let catalog = CountryCatalog::builtin();
        let mut map = MapState::new();
        let vp = viewport();
        for _ in 0..5 {
            map.view.zoom_in();
        }
        map.view.begin_drag(Point::ZERO, false);
        map.view.drag_move(Point::new(-200.0, 30.0));
        map.view.end_drag();

        let seoul = map.view.content_to_screen(Point::new(640.0, 170.0), &vp);
        assert!(map.click(&catalog, seoul, &vp));
        assert_eq!(map.selection().id(), Some("south-korea"));

        // 7 content units off is still inside the halo, on screen that is 7 * scale
        let scale = map.view.scale(&vp);
        let edge = seoul + Point::new(7.0 * scale, 0.0);
        assert_eq!(map.marker_under(&catalog, edge, &vp).unwrap().id, "south-korea");
        let outside = seoul + Point::new(9.0 * scale, 0.0);
        assert!(map.marker_under(&catalog, outside, &vp).is_none());
    }

    #[test]
    fn click_on_background_keeps_selection() {
        let catalog = CountryCatalog::builtin();
        let mut map = MapState::new();
        let vp = viewport();
        map.select_marker(&catalog, "uk");
        let empty = map.view.content_to_screen(CONTENT_CENTER + Point::new(0.0, 150.0), &vp);
        assert!(!map.click(&catalog, empty, &vp));
        assert_eq!(map.selection().id(), Some("uk"));
    }

    #[test]
    fn hover_tracks_pointer() {
        let catalog = CountryCatalog::builtin();
        let mut map = MapState::new();
        let vp = viewport();
        let algiers = map.view.content_to_screen(Point::new(440.0, 190.0), &vp);
        map.pointer_move(&catalog, algiers, &vp);
        assert_eq!(map.hovered(), Some("algeria"));
        map.pointer_move(&catalog, Point::new(5.0, 5.0), &vp);
        assert_eq!(map.hovered(), None);
        map.pointer_move(&catalog, algiers, &vp);
        map.pointer_leave();
        assert_eq!(map.hovered(), None);
    }

    #[test]
    fn collapsed_viewport_ignores_presses() {
        let catalog = CountryCatalog::builtin();
        let mut map = MapState::new();
        let vp = Viewport::new(Point::ZERO, Point::new(0.0, 0.0));
        assert_eq!(
            map.pointer_down(&catalog, Point::new(1.0, 1.0), &vp),
            PressOutcome::Ignored
        );
        assert!(!map.view.is_dragging());
    }
}
