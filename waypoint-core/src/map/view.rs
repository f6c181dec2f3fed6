//! Binding between session state and the map renderer.
//!
//! The renderer itself lives outside this crate and is reached through the
//! [`MapView`] trait. [`MapBinding`] owns at most one view per session: it is
//! created lazily from the first canonical position and never re-created.
//!
//! ```text
//! CanonicalChanged ──► first time: factory(MapInit) + apply all paint
//!                  └─► afterwards: set_center + set_marker
//! OverlayChanged   ──► set_layer_visibility + set_raster_opacity
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::overlay::{LayerPaint, OverlaySet, Visibility};
use super::style::MapStyle;
use crate::location::Coordinate;
use crate::session::SessionEvent;

/// Zoom level the camera starts at.
pub const DEFAULT_ZOOM: f64 = 11.0;

/// Colour of the position marker.
pub const DEFAULT_MARKER_COLOR: &str = "#111827";

/// Screen corner for a map control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ControlPosition {
    /// Top-left corner.
    #[default]
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

/// Renderer options that do not change during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Initial zoom level.
    pub zoom: f64,
    /// Marker colour as a CSS hex string.
    pub marker_color: String,
    /// Where the zoom/rotate control is placed.
    pub navigation_control: ControlPosition,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            marker_color: DEFAULT_MARKER_COLOR.to_string(),
            navigation_control: ControlPosition::TopLeft,
        }
    }
}

/// Everything the renderer needs to create the map.
#[derive(Debug, Clone)]
pub struct MapInit<'a> {
    /// Camera center and marker position.
    pub center: Coordinate,
    /// Static renderer options.
    pub options: &'a MapOptions,
    /// Sources and layers.
    pub style: &'a MapStyle,
    /// The same style rendered as a MapLibre v8 document.
    pub style_json: Value,
}

/// The map-rendering collaborator.
///
/// Implementations translate these calls into renderer operations (camera
/// moves, layout and paint property updates). None of them can fail from
/// the session's point of view.
pub trait MapView {
    /// Moves the camera center.
    fn set_center(&mut self, center: Coordinate);

    /// Moves the position marker.
    fn set_marker(&mut self, position: Coordinate);

    /// Shows or hides a layer.
    fn set_layer_visibility(&mut self, layer_id: &str, visibility: Visibility);

    /// Sets a raster layer's opacity.
    fn set_raster_opacity(&mut self, layer_id: &str, opacity: f64);
}

type MapFactory<V> = Box<dyn FnOnce(&MapInit<'_>) -> V>;

/// Session-scoped, lazily created map handle.
///
/// The factory runs at most once. After [`teardown`](Self::teardown) the
/// binding stays empty for the rest of the session.
pub struct MapBinding<V> {
    factory: Option<MapFactory<V>>,
    view: Option<V>,
    options: MapOptions,
    style: MapStyle,
}

impl<V: MapView> MapBinding<V> {
    /// Creates an empty binding that will build its view with `factory`.
    pub fn new(
        options: MapOptions,
        style: MapStyle,
        factory: impl FnOnce(&MapInit<'_>) -> V + 'static,
    ) -> Self {
        Self {
            factory: Some(Box::new(factory)),
            view: None,
            options,
            style,
        }
    }

    /// Returns true once the view exists.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.view.is_some()
    }

    /// The live view, if created.
    #[must_use]
    pub const fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    /// The style the view was (or will be) created with.
    #[must_use]
    pub const fn style(&self) -> &MapStyle {
        &self.style
    }

    /// Forwards session events to the view.
    ///
    /// Overlay changes before the view exists are dropped; the full paint
    /// state is applied when the view is created.
    pub fn apply(&mut self, events: &[SessionEvent], overlays: &OverlaySet) {
        for event in events {
            match event {
                SessionEvent::CanonicalChanged(position) => self.show_position(*position, overlays),
                SessionEvent::OverlayChanged(overlay) => {
                    if let Some(view) = self.view.as_mut() {
                        apply_paint(view, overlays.paint_for(*overlay));
                    }
                }
                _ => {}
            }
        }
    }

    /// Drops the view at session end. The binding never re-creates it.
    pub fn teardown(&mut self) -> Option<V> {
        self.factory = None;
        self.view.take()
    }

    fn show_position(&mut self, position: Coordinate, overlays: &OverlaySet) {
        if let Some(view) = self.view.as_mut() {
            view.set_center(position);
            view.set_marker(position);
            return;
        }

        let Some(factory) = self.factory.take() else {
            return;
        };
        let init = MapInit {
            center: position,
            options: &self.options,
            style: &self.style,
            style_json: self.style.to_style_json(overlays),
        };
        let mut view = factory(&init);
        for paint in overlays.paint_parameters() {
            apply_paint(&mut view, paint);
        }
        log::debug!("Map view created at zoom {}", self.options.zoom);
        self.view = Some(view);
    }
}

fn apply_paint<V: MapView>(view: &mut V, paint: LayerPaint) {
    view.set_layer_visibility(paint.layer_id, paint.visibility);
    view.set_raster_opacity(paint.layer_id, paint.opacity);
}
