//! Location module for Waypoint.
//!
//! Turns a one-shot device fix into the canonical position and derives the
//! share preview from it:
//!
//! ```text
//! raw fix ──► privacy filter ──► canonical ──► share preview
//!             (Exact | Blur)                   (Point | Radius)
//! ```
//!
//! - Blur rounds each axis to 3 decimal places (~111 m of latitude)
//! - Radius mode displaces uniformly over a disk (default 3 miles)
//! - Point mode discloses the canonical position unchanged
//!
//! # Example Usage
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use waypoint_core::location::{apply_privacy, preview, Coordinate, PrivacyMode, ShareMode};
//!
//! let raw = Coordinate::new(37.774_912, -122.419_412);
//! let canonical = apply_privacy(raw, PrivacyMode::Blur);
//! assert_eq!(canonical, Coordinate::new(37.775, -122.419));
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let point = preview(canonical, ShareMode::Point, &mut rng);
//! assert_eq!(point.coordinate, canonical);
//! ```

mod error;
pub mod jitter;
pub mod privacy;
mod provider;
pub mod types;

pub use error::{LocationError, LocationResult};
pub use jitter::{displace_within_miles, local_distance_miles, preview, preview_coordinate};
pub use privacy::{apply_privacy, blur, geohash_to_location, location_to_geohash};
pub use provider::LocationProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use provider::ScriptedProvider;
pub use types::{Coordinate, PrivacyMode, ShareMode, SharePreview, DEFAULT_SHARE_RADIUS_MILES};
