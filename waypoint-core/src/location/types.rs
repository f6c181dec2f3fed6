//! Location data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default disclosure radius for [`ShareMode::Radius`], in miles.
pub const DEFAULT_SHARE_RADIUS_MILES: f64 = 3.0;

/// A geographic position in degrees (WGS84-like, no datum conversion).
///
/// Coordinates are immutable once produced: every transformation in this
/// crate returns a fresh value. Range is not enforced here; fixes come from
/// a trusted platform location service.
///
/// # Example
///
/// ```
/// use waypoint_core::location::Coordinate;
///
/// let sf = Coordinate::new(37.7749, -122.4194);
/// assert_eq!(sf.latitude(), 37.7749);
/// assert_eq!(sf.longitude(), -122.4194);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns `[longitude, latitude]`, the axis order map libraries expect.
    #[must_use]
    pub const fn lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Returns true if both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Privacy transformation applied to a raw fix before it becomes canonical.
///
/// | Mode  | Decimal Places | Approximate Latitude Resolution |
/// |-------|----------------|---------------------------------|
/// | Exact | unchanged      | device accuracy                 |
/// | Blur  | 3              | ~111 m (coarser E-W near poles) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyMode {
    /// No transformation.
    Exact,
    /// Round each axis to 3 decimal places.
    #[default]
    Blur,
}

impl PrivacyMode {
    /// Returns the number of decimal places retained, or `None` for `Exact`.
    #[must_use]
    pub const fn decimal_places(self) -> Option<i32> {
        match self {
            Self::Exact => None,
            Self::Blur => Some(3),
        }
    }
}

/// How the canonical position is disclosed in the share preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareMode {
    /// Disclose a point drawn uniformly from the disk of the given radius.
    Radius {
        /// Disk radius in miles.
        miles: f64,
    },
    /// Disclose the canonical position as-is.
    Point,
}

impl ShareMode {
    /// Area disclosure with the default 3 mile radius.
    #[must_use]
    pub const fn default_radius() -> Self {
        Self::Radius {
            miles: DEFAULT_SHARE_RADIUS_MILES,
        }
    }

    /// Returns the disclosure radius in miles (zero for `Point`).
    #[must_use]
    pub const fn radius_miles(self) -> f64 {
        match self {
            Self::Radius { miles } => miles,
            Self::Point => 0.0,
        }
    }
}

impl Default for ShareMode {
    fn default() -> Self {
        Self::default_radius()
    }
}

/// The coordinate that would be disclosed to a third party.
///
/// Recomputed whenever the canonical position or [`ShareMode`] changes.
/// In `Radius` mode each recomputation draws fresh randomness, so two
/// previews of the same position are not expected to match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharePreview {
    /// The disclosed position.
    pub coordinate: Coordinate,

    /// Mode used to derive the position.
    pub mode: ShareMode,

    /// Geohash cell of the disclosed position, sized to the disclosure area.
    pub geohash: String,

    /// When the preview was generated (UTC).
    pub generated_at: DateTime<Utc>,
}

impl SharePreview {
    /// Creates a `SharePreview` from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or missing required fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Converts this preview to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (extremely rare).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privacy_mode_decimal_places() {
        assert_eq!(PrivacyMode::Exact.decimal_places(), None);
        assert_eq!(PrivacyMode::Blur.decimal_places(), Some(3));
    }

    #[test]
    fn privacy_mode_default_is_blur() {
        assert_eq!(PrivacyMode::default(), PrivacyMode::Blur);
    }

    #[test]
    fn share_mode_default_is_three_mile_radius() {
        assert_eq!(ShareMode::default(), ShareMode::Radius { miles: 3.0 });
        assert_eq!(ShareMode::default().radius_miles(), 3.0);
    }

    #[test]
    fn point_mode_has_zero_radius() {
        assert_eq!(ShareMode::Point.radius_miles(), 0.0);
    }

    #[test]
    fn coordinate_lng_lat_order() {
        let c = Coordinate::new(45.0, -93.0);
        assert_eq!(c.lng_lat(), [-93.0, 45.0]);
    }

    #[test]
    fn coordinate_is_finite() {
        assert!(Coordinate::new(45.0, -93.0).is_finite());
        assert!(!Coordinate::new(f64::NAN, -93.0).is_finite());
        assert!(!Coordinate::new(45.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn modes_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&PrivacyMode::Blur).unwrap(),
            "\"blur\""
        );
        assert_eq!(
            serde_json::to_string(&ShareMode::Point).unwrap(),
            "\"point\""
        );
        assert_eq!(
            serde_json::to_string(&ShareMode::default()).unwrap(),
            r#"{"radius":{"miles":3.0}}"#
        );
    }

    #[test]
    fn share_preview_json_roundtrip() {
        let preview = SharePreview {
            coordinate: Coordinate::new(45.0, -93.0),
            mode: ShareMode::Point,
            geohash: "cbj0b0fn".to_string(),
            generated_at: Utc::now(),
        };
        let json = preview.to_json().unwrap();
        let recovered = SharePreview::from_json(&json).unwrap();
        assert_eq!(recovered, preview);
    }
}
