//! Integration tests for the Waypoint session flow.
//!
//! These drive the public [`Waypoint`] API with a scripted location
//! provider and a recording map view, covering acquisition, privacy and
//! share mode changes, overlay styling and error handling end to end.

#![allow(clippy::float_cmp)]

mod helpers;

use helpers::{creations, recording_app, MapCall};
use waypoint_core::config::{RefreshPolicy, WaypointConfig};
use waypoint_core::location::{
    local_distance_miles, Coordinate, LocationError, PrivacyMode, ScriptedProvider, ShareMode,
};
use waypoint_core::map::{OverlayId, Visibility};
use waypoint_core::session::{FixRequest, Session, SessionEvent};

const RAW_SF: Coordinate = Coordinate::new(37.774_912, -122.419_412);
const BLURRED_SF: Coordinate = Coordinate::new(37.775, -122.419);

// ============================================================================
// Acquisition
// ============================================================================

#[tokio::test]
async fn start_blurs_and_creates_map_at_canonical() {
    let (mut app, log) = recording_app(
        WaypointConfig::default(),
        ScriptedProvider::always(RAW_SF, 1),
    );

    app.start().await;

    assert_eq!(app.session().canonical(), Some(BLURRED_SF));
    assert_eq!(app.session().status_text(), "37.775, -122.419");
    assert_eq!(
        log.borrow()[0],
        MapCall::Created {
            center: BLURRED_SF,
            zoom: 11.0
        }
    );
    assert_eq!(creations(&log), 1);
}

#[tokio::test]
async fn map_receives_initial_paint_after_creation() {
    let (mut app, log) = recording_app(
        WaypointConfig::default(),
        ScriptedProvider::always(RAW_SF, 1),
    );

    app.start().await;

    let calls = log.borrow();
    assert!(calls.contains(&MapCall::Visibility(
        "usgs_hillshade".to_string(),
        Visibility::Visible
    )));
    assert!(calls.contains(&MapCall::Opacity("usgs_hillshade".to_string(), 0.6)));
    assert!(calls.contains(&MapCall::Visibility(
        "usgs_topo".to_string(),
        Visibility::Hidden
    )));
    assert!(calls.contains(&MapCall::Visibility(
        "worldcover".to_string(),
        Visibility::Hidden
    )));
}

#[tokio::test]
async fn denial_leaves_everything_unset() {
    let (mut app, log) = recording_app(
        WaypointConfig::default(),
        ScriptedProvider::new([Err(LocationError::Denied)]),
    );

    let events = app.start().await;

    assert_eq!(
        events,
        vec![SessionEvent::LocationFailed(LocationError::Denied)]
    );
    assert_eq!(app.session().status_text(), "GPS access denied or unavailable");
    assert_eq!(app.session().preview_text(), "—");
    assert!(app.session().canonical().is_none());
    assert!(app.session().preview().is_none());
    assert!(app.map_view().is_none());
    assert!(log.borrow().is_empty());
}

#[tokio::test]
async fn unsupported_platform_is_reported() {
    let (mut app, _log) = recording_app(
        WaypointConfig::default(),
        ScriptedProvider::new([Err(LocationError::Unsupported)]),
    );

    app.start().await;

    assert_eq!(app.session().status_text(), "Geolocation not supported");
    assert!(app.map_view().is_none());
}

#[tokio::test]
async fn retry_after_denial_recovers() {
    let provider = ScriptedProvider::new([Err(LocationError::Denied), Ok(RAW_SF)]);
    let (mut app, log) = recording_app(WaypointConfig::default(), provider);

    app.start().await;
    app.retry().await;

    assert_eq!(app.session().canonical(), Some(BLURRED_SF));
    assert!(app.session().last_error().is_none());
    assert_eq!(creations(&log), 1);
}

#[tokio::test]
async fn requery_recenters_existing_map() {
    let moved = Coordinate::new(40.0, -100.0);
    let provider = ScriptedProvider::new([Ok(RAW_SF), Ok(moved)]);
    let (mut app, log) = recording_app(WaypointConfig::default(), provider);

    app.start().await;
    app.acquire().await;

    assert_eq!(creations(&log), 1);
    let calls = log.borrow();
    assert!(calls.contains(&MapCall::Center(moved)));
    assert!(calls.contains(&MapCall::Marker(moved)));
}

// ============================================================================
// Privacy mode
// ============================================================================

#[tokio::test]
async fn privacy_change_refilters_without_device_query() {
    let (mut app, _log) = recording_app(
        WaypointConfig::default(),
        ScriptedProvider::always(RAW_SF, 1),
    );
    app.start().await;

    let events = app.set_privacy(PrivacyMode::Exact).await;

    assert_eq!(app.provider().request_count(), 1);
    assert_eq!(app.session().canonical(), Some(RAW_SF));
    assert!(events.contains(&SessionEvent::CanonicalChanged(RAW_SF)));
}

#[tokio::test]
async fn requery_policy_queries_device_again() {
    let config = WaypointConfig {
        refresh_policy: RefreshPolicy::Requery,
        ..WaypointConfig::default()
    };
    let (mut app, log) = recording_app(config, ScriptedProvider::always(RAW_SF, 2));
    app.start().await;

    app.set_privacy(PrivacyMode::Exact).await;

    assert_eq!(app.provider().request_count(), 2);
    assert_eq!(app.session().canonical(), Some(RAW_SF));
    assert_eq!(creations(&log), 1);
}

#[tokio::test]
async fn privacy_change_after_failure_retries_acquisition() {
    let provider = ScriptedProvider::new([Err(LocationError::Denied), Ok(RAW_SF)]);
    let (mut app, _log) = recording_app(WaypointConfig::default(), provider);
    app.start().await;

    app.set_privacy(PrivacyMode::Exact).await;

    assert_eq!(app.provider().request_count(), 2);
    assert_eq!(app.session().canonical(), Some(RAW_SF));
}

// ============================================================================
// Share mode
// ============================================================================

#[tokio::test]
async fn point_mode_preview_equals_canonical() {
    let canonical = Coordinate::new(45.0, -93.0);
    let config = WaypointConfig {
        privacy: PrivacyMode::Exact,
        share: ShareMode::Point,
        ..WaypointConfig::default()
    };
    let (mut app, _log) = recording_app(config, ScriptedProvider::always(canonical, 1));

    app.start().await;

    let preview = app.session().preview().unwrap();
    assert_eq!(preview.coordinate, canonical);
    assert_eq!(preview.geohash.len(), 8);
    assert_eq!(app.session().preview_text(), "45.000, -93.000");
}

#[tokio::test]
async fn radius_mode_preview_within_three_miles() {
    let canonical = Coordinate::new(45.0, -93.0);
    let config = WaypointConfig {
        privacy: PrivacyMode::Exact,
        ..WaypointConfig::default()
    };
    let (mut app, _log) = recording_app(config, ScriptedProvider::always(canonical, 1));

    app.start().await;

    let preview = app.session().preview().unwrap().coordinate;
    assert!(local_distance_miles(canonical, preview) <= 3.0 + 1e-9);
}

#[tokio::test]
async fn switching_share_mode_recomputes_preview() {
    let (mut app, _log) = recording_app(
        WaypointConfig::default(),
        ScriptedProvider::always(RAW_SF, 1),
    );
    app.start().await;

    let events = app.set_share_mode(ShareMode::Point).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(app.session().preview().unwrap().coordinate, BLURRED_SF);

    app.set_share_mode(ShareMode::Radius { miles: 1.0 }).unwrap();
    let preview = app.session().preview().unwrap();
    assert!(local_distance_miles(BLURRED_SF, preview.coordinate) <= 1.0 + 1e-9);
    assert_eq!(preview.geohash.len(), 5);
}

#[tokio::test]
async fn invalid_radius_is_rejected() {
    let (mut app, _log) = recording_app(
        WaypointConfig::default(),
        ScriptedProvider::always(RAW_SF, 1),
    );
    app.start().await;

    assert!(app
        .set_share_mode(ShareMode::Radius { miles: f64::NAN })
        .is_err());
    assert_eq!(app.session().share_mode(), ShareMode::default());
}

// ============================================================================
// Overlays
// ============================================================================

#[tokio::test]
async fn overlay_toggle_restyles_map() {
    let (mut app, log) = recording_app(
        WaypointConfig::default(),
        ScriptedProvider::always(RAW_SF, 1),
    );
    app.start().await;
    let before = log.borrow().len();

    app.set_overlay_visible(OverlayId::Topo, true);
    app.set_overlay_opacity(OverlayId::Topo, 0.75).unwrap();

    let calls = log.borrow();
    assert_eq!(
        calls[before..],
        [
            MapCall::Visibility("usgs_topo".to_string(), Visibility::Visible),
            MapCall::Opacity("usgs_topo".to_string(), 0.0),
            MapCall::Visibility("usgs_topo".to_string(), Visibility::Visible),
            MapCall::Opacity("usgs_topo".to_string(), 0.75),
        ]
    );
}

#[tokio::test]
async fn overlay_changes_before_map_are_kept_for_creation() {
    let (mut app, log) = recording_app(
        WaypointConfig::default(),
        ScriptedProvider::always(RAW_SF, 1),
    );

    app.set_overlay_visible(OverlayId::WorldCover, true);
    assert!(log.borrow().is_empty());

    app.start().await;
    assert!(log.borrow().contains(&MapCall::Visibility(
        "worldcover".to_string(),
        Visibility::Visible
    )));
}

#[tokio::test]
async fn end_returns_view() {
    let (mut app, _log) = recording_app(
        WaypointConfig::default(),
        ScriptedProvider::always(RAW_SF, 1),
    );
    app.start().await;
    assert!(app.end().is_some());
}

// ============================================================================
// Manual sequencing (bridge-style flow)
// ============================================================================

#[test]
fn overlapping_acquisitions_latest_wins() {
    let mut session = Session::new(&WaypointConfig::default());
    let first = session.begin_fix();
    let second = session.begin_fix();

    // The older request resolves last; it must not overwrite the newer fix.
    session.complete_fix(second, Ok(Coordinate::new(2.0, 2.0)));
    let outcome = session.complete_fix(first, Ok(Coordinate::new(1.0, 1.0)));

    assert!(outcome.is_stale());
    assert_eq!(session.canonical(), Some(Coordinate::new(2.0, 2.0)));
}

#[test]
fn unknown_request_id_is_stale() {
    let mut session = Session::new(&WaypointConfig::default());
    session.begin_fix();
    assert!(session
        .complete_fix(FixRequest::from_id(999), Ok(Coordinate::new(1.0, 1.0)))
        .is_stale());
}
