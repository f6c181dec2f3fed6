//! Share-preview generation.
//!
//! `Point` mode discloses the canonical position unchanged. `Radius` mode
//! displaces it to a point drawn uniformly over a disk:
//!
//! ```text
//! r = R * sqrt(U1)        U1, U2 ~ U[0, 1)
//! θ = 2π * U2
//! lat' = lat + r sin θ / 69.0
//! lon' = lon + r cos θ / (69.172 * cos(lat))
//! ```
//!
//! The `sqrt` keeps the density uniform per unit area; sampling `r`
//! uniformly would cluster previews near the true position.
//!
//! # Approximation limits
//!
//! Miles are converted to degrees with a local flat-Earth model around the
//! canonical latitude. Near the poles `cos(lat)` approaches zero and the
//! longitude offset grows without bound, and the result is not wrapped at
//! the antimeridian. Both are accepted limits of this model.

use std::f64::consts::PI;

use chrono::Utc;
use rand::Rng;

use super::privacy::{geohash_precision_for_radius, location_to_geohash};
use super::types::{Coordinate, ShareMode, SharePreview};

/// Miles per degree of latitude.
pub const MILES_PER_DEGREE_LATITUDE: f64 = 69.0;

/// Miles per degree of longitude at the equator.
pub const MILES_PER_DEGREE_LONGITUDE_AT_EQUATOR: f64 = 69.172;

/// Miles spanned by one degree of longitude at `latitude` degrees.
#[must_use]
pub fn miles_per_degree_longitude(latitude: f64) -> f64 {
    MILES_PER_DEGREE_LONGITUDE_AT_EQUATOR * latitude.to_radians().cos()
}

/// Displaces `origin` inside a disk of `radius_miles` using two unit draws.
///
/// `u1` picks the distance (`radius * sqrt(u1)`), `u2` the bearing
/// (`2π * u2`, measured from east, counter-clockwise). Both are expected in
/// `[0, 1)`; this function is deterministic so callers control the source.
///
/// # Examples
///
/// ```
/// use waypoint_core::location::{displace_within_miles, Coordinate};
///
/// let origin = Coordinate::new(45.0, -93.0);
/// // Zero distance draw leaves the position untouched.
/// assert_eq!(displace_within_miles(origin, 3.0, 0.0, 0.0), origin);
///
/// // Full radius, bearing due north.
/// let north = displace_within_miles(origin, 3.0, 1.0, 0.25);
/// assert!((north.latitude() - (45.0 + 3.0 / 69.0)).abs() < 1e-12);
/// ```
#[must_use]
pub fn displace_within_miles(
    origin: Coordinate,
    radius_miles: f64,
    u1: f64,
    u2: f64,
) -> Coordinate {
    let r = radius_miles * u1.sqrt();
    let theta = 2.0 * PI * u2;

    let d_lat = (r * theta.sin()) / MILES_PER_DEGREE_LATITUDE;
    let d_lon = (r * theta.cos()) / miles_per_degree_longitude(origin.latitude());

    Coordinate::new(origin.latitude() + d_lat, origin.longitude() + d_lon)
}

/// Returns the coordinate to disclose for `canonical` under `mode`.
///
/// `Radius` mode consumes two draws from `rng` per call, so repeated calls
/// yield different coordinates.
#[must_use]
pub fn preview_coordinate<R: Rng + ?Sized>(
    canonical: Coordinate,
    mode: ShareMode,
    rng: &mut R,
) -> Coordinate {
    match mode {
        ShareMode::Point => canonical,
        ShareMode::Radius { miles } => {
            let u1: f64 = rng.gen();
            let u2: f64 = rng.gen();
            displace_within_miles(canonical, miles, u1, u2)
        }
    }
}

/// Builds the full [`SharePreview`] for `canonical` under `mode`.
///
/// The attached geohash is sized so its cell is at least as large as the
/// disclosure radius.
#[must_use]
pub fn preview<R: Rng + ?Sized>(
    canonical: Coordinate,
    mode: ShareMode,
    rng: &mut R,
) -> SharePreview {
    let coordinate = preview_coordinate(canonical, mode, rng);
    let precision = geohash_precision_for_radius(mode.radius_miles());

    SharePreview {
        coordinate,
        mode,
        geohash: location_to_geohash(coordinate, precision),
        generated_at: Utc::now(),
    }
}

/// Distance in miles between two nearby points, in the same local
/// flat-Earth projection the jitter uses (anchored at `origin`'s latitude).
#[must_use]
pub fn local_distance_miles(origin: Coordinate, other: Coordinate) -> f64 {
    let dy = (other.latitude() - origin.latitude()) * MILES_PER_DEGREE_LATITUDE;
    let dx =
        (other.longitude() - origin.longitude()) * miles_per_degree_longitude(origin.latitude());
    dx.hypot(dy)
}
