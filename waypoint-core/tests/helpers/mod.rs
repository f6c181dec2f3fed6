//! Reusable test helpers for session integration tests.
//!
//! [`RecordingMapView`] stands in for the renderer and keeps a log of
//! every call so tests can assert on what the map was told.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use waypoint_core::config::WaypointConfig;
use waypoint_core::location::{Coordinate, ScriptedProvider};
use waypoint_core::map::{MapView, Visibility};
use waypoint_core::Waypoint;

/// One renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    Created { center: Coordinate, zoom: f64 },
    Center(Coordinate),
    Marker(Coordinate),
    Visibility(String, Visibility),
    Opacity(String, f64),
}

/// Map view that appends every call to a shared log.
#[derive(Debug, Clone)]
pub struct RecordingMapView {
    log: Rc<RefCell<Vec<MapCall>>>,
}

impl MapView for RecordingMapView {
    fn set_center(&mut self, center: Coordinate) {
        self.log.borrow_mut().push(MapCall::Center(center));
    }

    fn set_marker(&mut self, position: Coordinate) {
        self.log.borrow_mut().push(MapCall::Marker(position));
    }

    fn set_layer_visibility(&mut self, layer_id: &str, visibility: Visibility) {
        self.log
            .borrow_mut()
            .push(MapCall::Visibility(layer_id.to_string(), visibility));
    }

    fn set_raster_opacity(&mut self, layer_id: &str, opacity: f64) {
        self.log
            .borrow_mut()
            .push(MapCall::Opacity(layer_id.to_string(), opacity));
    }
}

/// Shared call log handed out alongside the app.
pub type MapLog = Rc<RefCell<Vec<MapCall>>>;

/// Builds an app with a scripted provider and a recording map view.
///
/// The jitter source is seeded so runs are reproducible.
pub fn recording_app(
    config: WaypointConfig,
    provider: ScriptedProvider,
) -> (Waypoint<ScriptedProvider, RecordingMapView>, MapLog) {
    let log: MapLog = Rc::new(RefCell::new(Vec::new()));
    let factory_log = Rc::clone(&log);

    let app = Waypoint::with_rng(
        config,
        provider,
        move |init| {
            factory_log.borrow_mut().push(MapCall::Created {
                center: init.center,
                zoom: init.options.zoom,
            });
            RecordingMapView { log: factory_log }
        },
        StdRng::seed_from_u64(2024),
    )
    .expect("default config is valid");

    (app, log)
}

/// Number of times the map was created.
pub fn creations(log: &MapLog) -> usize {
    log.borrow()
        .iter()
        .filter(|call| matches!(call, MapCall::Created { .. }))
        .count()
}
