//! Privacy filtering and geohash encoding.
//!
//! This module provides functions for:
//! - Coordinate blurring (reducing precision for privacy)
//! - Geohash encoding sized to a disclosure radius
//! - Geohash decoding (for testing and verification)

use super::types::{Coordinate, PrivacyMode};

/// Meters per statute mile.
const METERS_PER_MILE: f64 = 1_609.344;

/// Geohash length used when a point is disclosed without an area.
pub const POINT_GEOHASH_PRECISION: u8 = 8;

/// Rounds a single axis value to `decimals` decimal places.
///
/// Uses round-half-away-from-zero (`f64::round`), so `0.0005` becomes
/// `0.001` and `-0.0005` becomes `-0.001`.
///
/// # Examples
///
/// ```
/// use waypoint_core::location::privacy::round_to_places;
///
/// assert_eq!(round_to_places(37.774_912, 3), 37.775);
/// ```
#[must_use]
pub fn round_to_places(value: f64, decimals: i32) -> f64 {
    let multiplier = 10_f64.powi(decimals);
    (value * multiplier).round() / multiplier
}

/// Blurs a coordinate to 3 decimal places on each axis.
///
/// That is roughly 111 m of latitude; longitude resolution shrinks with
/// `cos(latitude)`. Blurring an already blurred coordinate is a no-op.
///
/// # Examples
///
/// ```
/// use waypoint_core::location::{blur, Coordinate};
///
/// let raw = Coordinate::new(37.774_912, -122.419_412);
/// assert_eq!(blur(raw), Coordinate::new(37.775, -122.419));
/// ```
#[must_use]
pub fn blur(coordinate: Coordinate) -> Coordinate {
    apply_privacy(coordinate, PrivacyMode::Blur)
}

/// Applies a [`PrivacyMode`] to a raw fix, producing the canonical position.
///
/// `Exact` returns the input unchanged.
#[must_use]
pub fn apply_privacy(raw: Coordinate, mode: PrivacyMode) -> Coordinate {
    match mode.decimal_places() {
        None => raw,
        Some(decimals) => Coordinate::new(
            round_to_places(raw.latitude(), decimals),
            round_to_places(raw.longitude(), decimals),
        ),
    }
}

/// Converts a coordinate to a geohash string.
///
/// Returns an empty string if encoding fails (non-finite or out-of-range
/// input). Normal GPS data never hits that path.
///
/// # Examples
///
/// ```
/// use waypoint_core::location::{location_to_geohash, Coordinate};
///
/// let geohash = location_to_geohash(Coordinate::new(37.7749, -122.4194), 8);
/// assert_eq!(geohash.len(), 8);
/// ```
#[must_use]
pub fn location_to_geohash(coordinate: Coordinate, precision: u8) -> String {
    geohash::encode(
        geohash::Coord {
            x: coordinate.longitude(),
            y: coordinate.latitude(),
        },
        precision as usize,
    )
    .unwrap_or_default()
}

/// Decodes a geohash string to the center of its cell.
///
/// Returns `None` for empty or malformed geohashes.
#[must_use]
pub fn geohash_to_location(geohash: &str) -> Option<Coordinate> {
    if geohash.is_empty() {
        return None;
    }
    geohash::decode(geohash)
        .ok()
        .map(|(coord, _, _)| Coordinate::new(coord.y, coord.x))
}

/// Approximate error radius in meters for a geohash of the given length.
#[must_use]
pub const fn geohash_error_radius(precision: u8) -> f64 {
    match precision {
        1 => 2_500_000.0,
        2 => 630_000.0,
        3 => 78_000.0,
        4 => 20_000.0,
        5 => 2_400.0,
        6 => 610.0,
        7 => 76.0,
        8 => 19.0,
        9 => 2.4,
        10 => 0.6,
        _ => 0.0,
    }
}

/// Picks the longest geohash whose cell still covers a disclosure radius.
///
/// A radius of zero (point disclosure) yields [`POINT_GEOHASH_PRECISION`].
/// The geohash never narrows the area more than the radius already does.
///
/// # Examples
///
/// ```
/// use waypoint_core::location::privacy::geohash_precision_for_radius;
///
/// assert_eq!(geohash_precision_for_radius(0.0), 8);
/// assert_eq!(geohash_precision_for_radius(3.0), 4); // ~4.8 km -> ±20 km cells
/// ```
#[must_use]
pub fn geohash_precision_for_radius(radius_miles: f64) -> u8 {
    if radius_miles <= 0.0 {
        return POINT_GEOHASH_PRECISION;
    }
    let radius_m = radius_miles * METERS_PER_MILE;
    (1..=POINT_GEOHASH_PRECISION)
        .rev()
        .find(|&p| geohash_error_radius(p) >= radius_m)
        .unwrap_or(1)
}
