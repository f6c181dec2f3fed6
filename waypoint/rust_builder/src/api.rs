//! API bridging layer that exposes waypoint-core to Flutter.
//!
//! Dart owns the platform geolocation call and the map widget, so the
//! bridge drives [`Session`] with explicit request ids instead of going
//! through [`waypoint_core::Waypoint`]: call [`WaypointSession::begin_fix`],
//! ask the platform for a position, then hand the answer back with the same
//! id. Late answers for superseded ids are ignored.

use flutter_rust_bridge::frb;
pub use waypoint_core::location::PrivacyMode;
pub use waypoint_core::map::OverlayId;
use waypoint_core::config::WaypointConfig;
use waypoint_core::location::{Coordinate, LocationError, ShareMode};
use waypoint_core::map::MapStyle;
use waypoint_core::session::{FixRequest, Session};

/// One UI session (FFI wrapper around [`Session`]).
#[derive(Debug)]
#[frb(opaque)]
pub struct WaypointSession {
    inner: Session,
    style: MapStyle,
}

impl WaypointSession {
    /// Creates a session from an optional JSON configuration.
    ///
    /// `None` uses the defaults (Blur, 3 mile radius, hillshade on).
    #[frb(sync)]
    pub fn new(config_json: Option<String>) -> Result<Self, String> {
        let config = match config_json {
            Some(json) => WaypointConfig::from_json(&json).map_err(|e| e.to_string())?,
            None => WaypointConfig::default(),
        };
        Ok(Self {
            inner: Session::new(&config),
            style: MapStyle::default(),
        })
    }

    // ==================== Acquisition ====================

    /// Starts an acquisition and returns its request id.
    #[frb(sync)]
    pub fn begin_fix(&mut self) -> u64 {
        self.inner.begin_fix().id()
    }

    /// Delivers a position for `request_id`.
    ///
    /// Returns false when the id was superseded and the fix was dropped.
    #[frb(sync)]
    pub fn complete_fix(&mut self, request_id: u64, latitude: f64, longitude: f64) -> bool {
        let outcome = self.inner.complete_fix(
            FixRequest::from_id(request_id),
            Ok(Coordinate::new(latitude, longitude)),
        );
        !outcome.is_stale()
    }

    /// Reports a failed acquisition for `request_id`.
    ///
    /// `unsupported` marks a platform without location capability; anything
    /// else (denied permission, timeout, unavailable) counts as denied.
    #[frb(sync)]
    pub fn fail_fix(&mut self, request_id: u64, unsupported: bool) -> bool {
        let error = if unsupported {
            LocationError::Unsupported
        } else {
            LocationError::Denied
        };
        let outcome = self
            .inner
            .complete_fix(FixRequest::from_id(request_id), Err(error));
        !outcome.is_stale()
    }

    /// Starts a retry, or returns `None` when location is unsupported.
    #[frb(sync)]
    pub fn retry(&mut self) -> Option<u64> {
        self.inner.retry().map(FixRequest::id)
    }

    /// Request id currently awaited, if any.
    #[frb(sync)]
    #[must_use]
    pub fn pending_fix(&self) -> Option<u64> {
        self.inner.pending_fix().map(FixRequest::id)
    }

    // ==================== Modes ====================

    /// Gets the privacy mode.
    #[frb(sync)]
    #[must_use]
    pub fn privacy(&self) -> PrivacyMode {
        self.inner.privacy()
    }

    /// Switches the privacy mode.
    ///
    /// Returns a request id when the platform must be queried for a new fix.
    #[frb(sync)]
    pub fn set_privacy(&mut self, mode: PrivacyMode) -> Option<u64> {
        self.inner.set_privacy(mode).fix_request.map(FixRequest::id)
    }

    /// Shares an approximate position within `miles` of the canonical one.
    #[frb(sync)]
    pub fn set_share_radius(&mut self, miles: f64) -> Result<(), String> {
        self.inner
            .set_share_mode(ShareMode::Radius { miles })
            .map(drop)
            .map_err(|e| e.to_string())
    }

    /// Shares the canonical position itself.
    #[frb(sync)]
    pub fn set_share_point(&mut self) {
        if let Err(e) = self.inner.set_share_mode(ShareMode::Point) {
            log::warn!("Point share mode rejected: {e}");
        }
    }

    /// Gets the share radius in miles, or 0 in point mode.
    #[frb(sync)]
    #[must_use]
    pub fn share_radius_miles(&self) -> f64 {
        self.inner.share_mode().radius_miles()
    }

    /// Draws a fresh share preview.
    #[frb(sync)]
    pub fn regenerate_preview(&mut self) {
        self.inner.regenerate_preview();
    }

    // ==================== Overlays ====================

    /// Shows or hides an overlay. Returns true if anything changed.
    #[frb(sync)]
    pub fn set_overlay_visible(&mut self, overlay: OverlayId, visible: bool) -> bool {
        !self.inner.set_overlay_visible(overlay, visible).is_empty()
    }

    /// Sets an overlay's opacity. Returns true if anything changed.
    #[frb(sync)]
    pub fn set_overlay_opacity(&mut self, overlay: OverlayId, opacity: f64) -> Result<bool, String> {
        self.inner
            .set_overlay_opacity(overlay, opacity)
            .map(|events| !events.is_empty())
            .map_err(|e| e.to_string())
    }

    /// Paint parameters for every overlay as a JSON array.
    #[frb(sync)]
    pub fn paint_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.inner.paint_parameters()).map_err(|e| e.to_string())
    }

    // ==================== Display ====================

    /// Location pill text.
    #[frb(sync)]
    #[must_use]
    pub fn status_text(&self) -> String {
        self.inner.status_text()
    }

    /// Share preview pill text.
    #[frb(sync)]
    #[must_use]
    pub fn preview_text(&self) -> String {
        self.inner.preview_text()
    }

    /// Canonical latitude, once located.
    #[frb(sync)]
    #[must_use]
    pub fn canonical_latitude(&self) -> Option<f64> {
        self.inner.canonical().map(|c| c.latitude())
    }

    /// Canonical longitude, once located.
    #[frb(sync)]
    #[must_use]
    pub fn canonical_longitude(&self) -> Option<f64> {
        self.inner.canonical().map(|c| c.longitude())
    }

    /// The latest share preview as JSON.
    #[frb(sync)]
    pub fn preview_json(&self) -> Result<Option<String>, String> {
        self.inner
            .preview()
            .map(|preview| preview.to_json().map_err(|e| e.to_string()))
            .transpose()
    }

    /// MapLibre style document reflecting the current overlay state.
    #[frb(sync)]
    #[must_use]
    pub fn style_json(&self) -> String {
        self.style.to_style_json(self.inner.overlays()).to_string()
    }

    /// Attribution strings for every tile source.
    #[frb(sync)]
    #[must_use]
    pub fn attributions(&self) -> Vec<String> {
        self.style
            .attributions()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
