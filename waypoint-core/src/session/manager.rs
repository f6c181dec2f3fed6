//! The session state machine.
//!
//! [`Session`] holds every piece of user-visible state and makes the
//! dependency graph explicit:
//!
//! ```text
//! PrivacyMode ─┐
//! raw fix ─────┴─► canonical ─┐
//! ShareMode ──────────────────┴─► share preview
//! overlay toggles/opacities ────► paint parameters
//! ```
//!
//! Each mutator recomputes what depends on it and returns the resulting
//! [`SessionEvent`]s, in order, for the caller to forward to dependents.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::status::format_preview;
use super::types::{FixOutcome, FixRequest, LocationStatus, PrivacyChange, SessionEvent};
use crate::config::{validate_share_mode, ConfigError, RefreshPolicy, WaypointConfig};
use crate::location::{
    apply_privacy, preview, Coordinate, LocationError, LocationResult, PrivacyMode, ShareMode,
    SharePreview,
};
use crate::map::{LayerPaint, OverlayId, OverlaySet};

/// State of a single UI session.
///
/// Nothing here survives the session; there is no persistence.
#[derive(Debug)]
pub struct Session {
    privacy: PrivacyMode,
    share: ShareMode,
    refresh_policy: RefreshPolicy,
    overlays: OverlaySet,

    raw_fix: Option<Coordinate>,
    canonical: Option<Coordinate>,
    preview: Option<SharePreview>,
    last_error: Option<LocationError>,

    issued_requests: u64,
    pending: Option<FixRequest>,
    rng: StdRng,
}

impl Session {
    /// Creates a session from a configuration, seeding jitter from OS entropy.
    #[must_use]
    pub fn new(config: &WaypointConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a session with an explicit random source.
    #[must_use]
    pub fn with_rng(config: &WaypointConfig, rng: StdRng) -> Self {
        Self {
            privacy: config.privacy,
            share: config.share,
            refresh_policy: config.refresh_policy,
            overlays: config.overlays.clone(),
            raw_fix: None,
            canonical: None,
            preview: None,
            last_error: None,
            issued_requests: 0,
            pending: None,
            rng,
        }
    }

    // ==================== Accessors ====================

    /// Current privacy mode.
    #[must_use]
    pub const fn privacy(&self) -> PrivacyMode {
        self.privacy
    }

    /// Current share mode.
    #[must_use]
    pub const fn share_mode(&self) -> ShareMode {
        self.share
    }

    /// The canonical (privacy-filtered) position, if one was acquired.
    #[must_use]
    pub const fn canonical(&self) -> Option<Coordinate> {
        self.canonical
    }

    /// The latest share preview, if a canonical position exists.
    #[must_use]
    pub const fn preview(&self) -> Option<&SharePreview> {
        self.preview.as_ref()
    }

    /// The error of the last failed acquisition, cleared by a success.
    #[must_use]
    pub const fn last_error(&self) -> Option<LocationError> {
        self.last_error
    }

    /// The acquisition currently awaited, if any.
    #[must_use]
    pub const fn pending_fix(&self) -> Option<FixRequest> {
        self.pending
    }

    /// Overlay state.
    #[must_use]
    pub const fn overlays(&self) -> &OverlaySet {
        &self.overlays
    }

    /// Paint parameters for every overlay.
    #[must_use]
    pub fn paint_parameters(&self) -> Vec<LayerPaint> {
        self.overlays.paint_parameters()
    }

    /// What the location pill should show.
    ///
    /// A canonical position wins over a later error, so a failed re-query
    /// keeps showing the last good position.
    #[must_use]
    pub const fn status(&self) -> LocationStatus {
        match (self.canonical, self.last_error) {
            (Some(position), _) => LocationStatus::Located(position),
            (None, Some(error)) => LocationStatus::Failed(error),
            (None, None) => LocationStatus::Locating,
        }
    }

    /// Location pill text.
    #[must_use]
    pub fn status_text(&self) -> String {
        self.status().to_string()
    }

    /// Share preview pill text.
    #[must_use]
    pub fn preview_text(&self) -> String {
        format_preview(self.preview.as_ref())
    }

    // ==================== Acquisition ====================

    /// Issues a new acquisition request, superseding any pending one.
    pub fn begin_fix(&mut self) -> FixRequest {
        self.issued_requests += 1;
        let request = FixRequest::from_id(self.issued_requests);
        if let Some(superseded) = self.pending.replace(request) {
            log::debug!(
                "Fix request {} supersedes pending request {}",
                request.id(),
                superseded.id()
            );
        }
        request
    }

    /// Delivers the platform's answer for `request`.
    ///
    /// Results for anything but the latest request are ignored. A fix with a
    /// non-finite component counts as a failed fix.
    pub fn complete_fix(
        &mut self,
        request: FixRequest,
        result: LocationResult<Coordinate>,
    ) -> FixOutcome {
        if self.pending != Some(request) {
            log::debug!("Ignoring stale fix result for request {}", request.id());
            return FixOutcome::Stale;
        }
        self.pending = None;

        let result = result.and_then(|raw| {
            if raw.is_finite() {
                Ok(raw)
            } else {
                log::warn!("Platform returned a non-finite fix; treating as denied");
                Err(LocationError::Denied)
            }
        });

        match result {
            Ok(raw) => {
                self.raw_fix = Some(raw);
                self.last_error = None;
                FixOutcome::Applied(self.publish_canonical(apply_privacy(raw, self.privacy)))
            }
            Err(error) => {
                log::warn!("Location acquisition failed: {error}");
                self.last_error = Some(error);
                FixOutcome::Applied(vec![SessionEvent::LocationFailed(error)])
            }
        }
    }

    /// Requests a new fix after a failure or on explicit user action.
    ///
    /// Returns `None` when the platform reported no location capability,
    /// which is terminal for the session.
    pub fn retry(&mut self) -> Option<FixRequest> {
        if self.last_error == Some(LocationError::Unsupported) {
            return None;
        }
        Some(self.begin_fix())
    }

    // ==================== Mode changes ====================

    /// Switches the privacy mode.
    ///
    /// With [`RefreshPolicy::RefilterCachedFix`] the cached raw fix is
    /// re-filtered immediately. Otherwise, or when nothing is cached, a new
    /// device fix is requested unless one is already pending (the pending
    /// result will be filtered with the new mode).
    pub fn set_privacy(&mut self, mode: PrivacyMode) -> PrivacyChange {
        if mode == self.privacy {
            return PrivacyChange::default();
        }
        self.privacy = mode;
        let mut events = vec![SessionEvent::PrivacyChanged(mode)];

        let cached = match self.refresh_policy {
            RefreshPolicy::RefilterCachedFix => self.raw_fix,
            RefreshPolicy::Requery => None,
        };

        let fix_request = match (cached, self.pending) {
            (Some(raw), _) => {
                events.extend(self.publish_canonical(apply_privacy(raw, mode)));
                None
            }
            (None, Some(_)) if self.refresh_policy == RefreshPolicy::RefilterCachedFix => None,
            (None, _) => Some(self.begin_fix()),
        };

        PrivacyChange {
            events,
            fix_request,
        }
    }

    /// Switches the share mode and recomputes the preview.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRadius`] for a negative or non-finite
    /// radius; the session is left unchanged.
    pub fn set_share_mode(&mut self, mode: ShareMode) -> Result<Vec<SessionEvent>, ConfigError> {
        validate_share_mode(mode)?;
        if mode == self.share {
            return Ok(Vec::new());
        }
        self.share = mode;

        let mut events = vec![SessionEvent::ShareModeChanged(mode)];
        events.extend(self.recompute_preview());
        Ok(events)
    }

    /// Draws a fresh share preview for the current position and mode.
    pub fn regenerate_preview(&mut self) -> Vec<SessionEvent> {
        self.recompute_preview().into_iter().collect()
    }

    // ==================== Overlays ====================

    /// Shows or hides an overlay.
    pub fn set_overlay_visible(&mut self, overlay: OverlayId, visible: bool) -> Vec<SessionEvent> {
        if self.overlays.set_visible(overlay, visible) {
            vec![SessionEvent::OverlayChanged(overlay)]
        } else {
            Vec::new()
        }
    }

    /// Sets an overlay's opacity (clamped into `[0, 1]`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOpacity`] for NaN.
    pub fn set_overlay_opacity(
        &mut self,
        overlay: OverlayId,
        opacity: f64,
    ) -> Result<Vec<SessionEvent>, ConfigError> {
        if self.overlays.set_opacity(overlay, opacity)? {
            Ok(vec![SessionEvent::OverlayChanged(overlay)])
        } else {
            Ok(Vec::new())
        }
    }

    // ==================== Derivation ====================

    fn publish_canonical(&mut self, canonical: Coordinate) -> Vec<SessionEvent> {
        self.canonical = Some(canonical);
        let mut events = vec![SessionEvent::CanonicalChanged(canonical)];
        events.extend(self.recompute_preview());
        events
    }

    fn recompute_preview(&mut self) -> Option<SessionEvent> {
        let canonical = self.canonical?;
        let next = preview(canonical, self.share, &mut self.rng);
        self.preview = Some(next.clone());
        Some(SessionEvent::PreviewChanged(next))
    }
}
