//! High-level session API.

use rand::rngs::StdRng;
use tokio::time::{timeout, Duration};

use crate::config::{ConfigError, WaypointConfig};
use crate::location::{LocationError, LocationProvider, PrivacyMode, ShareMode};
use crate::map::{MapBinding, MapInit, MapStyle, MapView, OverlayId};
use crate::session::{FixRequest, Session, SessionEvent};

/// Entry point for a Waypoint UI session.
///
/// Wires a [`LocationProvider`], the [`Session`] state machine and a lazily
/// created [`MapView`]. Every call returns the [`SessionEvent`]s it produced
/// after they have been applied to the map.
///
/// Acquisition awaits the provider under a timeout and therefore must run
/// inside a Tokio runtime with the time driver enabled.
///
/// # Example
///
/// ```ignore
/// use waypoint_core::config::WaypointConfig;
/// use waypoint_core::Waypoint;
///
/// let mut app = Waypoint::new(WaypointConfig::default(), geolocation, |init| {
///     MapLibreView::create(init)
/// })?;
/// app.start().await;
/// println!("{}", app.session().status_text());
/// ```
pub struct Waypoint<P, V> {
    session: Session,
    provider: P,
    map: MapBinding<V>,
    fix_timeout: Duration,
}

impl<P: LocationProvider, V: MapView> Waypoint<P, V> {
    /// Creates a session that has not yet requested a fix.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field of `config`.
    pub fn new(
        config: WaypointConfig,
        provider: P,
        map_factory: impl FnOnce(&MapInit<'_>) -> V + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = Session::new(&config);
        Ok(Self::assemble(config, session, provider, map_factory))
    }

    /// Like [`new`](Self::new) but with an explicit jitter source.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field of `config`.
    pub fn with_rng(
        config: WaypointConfig,
        provider: P,
        map_factory: impl FnOnce(&MapInit<'_>) -> V + 'static,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = Session::with_rng(&config, rng);
        Ok(Self::assemble(config, session, provider, map_factory))
    }

    fn assemble(
        config: WaypointConfig,
        session: Session,
        provider: P,
        map_factory: impl FnOnce(&MapInit<'_>) -> V + 'static,
    ) -> Self {
        Self {
            session,
            provider,
            map: MapBinding::new(config.map.clone(), MapStyle::default(), map_factory),
            fix_timeout: config.fix_timeout(),
        }
    }

    /// Session state.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The location provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// The map view, once the first position created it.
    #[must_use]
    pub const fn map_view(&self) -> Option<&V> {
        self.map.view()
    }

    /// Acquires the first fix of the session.
    pub async fn start(&mut self) -> Vec<SessionEvent> {
        self.acquire().await
    }

    /// Requests a fix and applies the result.
    pub async fn acquire(&mut self) -> Vec<SessionEvent> {
        let request = self.session.begin_fix();
        self.resolve(request).await
    }

    /// Retries after a failure. Does nothing once the platform reported
    /// that location is unsupported.
    pub async fn retry(&mut self) -> Vec<SessionEvent> {
        match self.session.retry() {
            Some(request) => self.resolve(request).await,
            None => Vec::new(),
        }
    }

    /// Switches the privacy mode, querying the device only when needed.
    pub async fn set_privacy(&mut self, mode: PrivacyMode) -> Vec<SessionEvent> {
        let change = self.session.set_privacy(mode);
        let mut events = self.publish(change.events);
        if let Some(request) = change.fix_request {
            events.extend(self.resolve(request).await);
        }
        events
    }

    /// Switches the share mode.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRadius`] for a bad radius.
    pub fn set_share_mode(&mut self, mode: ShareMode) -> Result<Vec<SessionEvent>, ConfigError> {
        let events = self.session.set_share_mode(mode)?;
        Ok(self.publish(events))
    }

    /// Shows or hides an overlay.
    pub fn set_overlay_visible(&mut self, overlay: OverlayId, visible: bool) -> Vec<SessionEvent> {
        let events = self.session.set_overlay_visible(overlay, visible);
        self.publish(events)
    }

    /// Sets an overlay's opacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOpacity`] for NaN.
    pub fn set_overlay_opacity(
        &mut self,
        overlay: OverlayId,
        opacity: f64,
    ) -> Result<Vec<SessionEvent>, ConfigError> {
        let events = self.session.set_overlay_opacity(overlay, opacity)?;
        Ok(self.publish(events))
    }

    /// Ends the session, returning the map view for disposal.
    pub fn end(mut self) -> Option<V> {
        self.map.teardown()
    }

    async fn resolve(&mut self, request: FixRequest) -> Vec<SessionEvent> {
        let result = match timeout(self.fix_timeout, self.provider.request_fix()).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "Fix request {} timed out after {:?}",
                    request.id(),
                    self.fix_timeout
                );
                Err(LocationError::Denied)
            }
        };
        let events = self.session.complete_fix(request, result).into_events();
        self.publish(events)
    }

    fn publish(&mut self, events: Vec<SessionEvent>) -> Vec<SessionEvent> {
        self.map.apply(&events, self.session.overlays());
        events
    }
}

#[cfg(test)]
mod tests {
    use std::future::{pending, Future};

    use rand::SeedableRng;

    use super::*;
    use crate::location::{Coordinate, LocationResult, ScriptedProvider};
    use crate::map::Visibility;

    #[derive(Debug, Default)]
    struct NullView;

    impl MapView for NullView {
        fn set_center(&mut self, _: Coordinate) {}
        fn set_marker(&mut self, _: Coordinate) {}
        fn set_layer_visibility(&mut self, _: &str, _: Visibility) {}
        fn set_raster_opacity(&mut self, _: &str, _: f64) {}
    }

    struct NeverResolves;

    impl LocationProvider for NeverResolves {
        fn request_fix(&self) -> impl Future<Output = LocationResult<Coordinate>> + Send {
            pending()
        }
    }

    #[tokio::test]
    async fn start_creates_map_on_success() {
        let provider = ScriptedProvider::always(Coordinate::new(45.0, -93.0), 1);
        let mut app = Waypoint::with_rng(
            WaypointConfig::default(),
            provider,
            |_| NullView,
            StdRng::seed_from_u64(5),
        )
        .unwrap();

        let events = app.start().await;
        assert_eq!(events.len(), 2);
        assert!(app.map_view().is_some());
    }

    #[tokio::test]
    async fn start_failure_leaves_map_uninitialized() {
        let provider = ScriptedProvider::new([Err(LocationError::Unsupported)]);
        let mut app = Waypoint::new(WaypointConfig::default(), provider, |_| NullView).unwrap();

        app.start().await;
        assert!(app.map_view().is_none());
        assert_eq!(app.session().status_text(), "Geolocation not supported");
        assert!(app.retry().await.is_empty());
        assert_eq!(app.provider().request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_counts_as_denied() {
        let config = WaypointConfig {
            fix_timeout_secs: 1,
            ..WaypointConfig::default()
        };
        let mut app = Waypoint::new(config, NeverResolves, |_| NullView).unwrap();

        let events = app.start().await;
        assert_eq!(events, vec![SessionEvent::LocationFailed(LocationError::Denied)]);
        assert!(app.session().pending_fix().is_none());
    }

    #[test]
    fn invalid_config_rejected() {
        let config = WaypointConfig {
            fix_timeout_secs: 0,
            ..WaypointConfig::default()
        };
        let result = Waypoint::new(config, NeverResolves, |_| NullView);
        assert!(matches!(result, Err(ConfigError::InvalidTimeout)));
    }
}
