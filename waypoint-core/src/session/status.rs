//! Status pill text.

use std::fmt;

use super::types::LocationStatus;
use crate::location::{Coordinate, SharePreview};

/// Shown while no position and no error exist.
pub const LOCATING_TEXT: &str = "Locating…";

/// Shown when no share preview exists.
pub const NO_PREVIEW_TEXT: &str = "—";

/// Formats a coordinate as `"lat, lon"` with 3 decimals.
///
/// # Examples
///
/// ```
/// use waypoint_core::location::Coordinate;
/// use waypoint_core::session::format_coordinate;
///
/// assert_eq!(format_coordinate(Coordinate::new(45.0, -93.0)), "45.000, -93.000");
/// ```
#[must_use]
pub fn format_coordinate(coordinate: Coordinate) -> String {
    format!("{:.3}, {:.3}", coordinate.latitude(), coordinate.longitude())
}

/// Formats the share preview pill.
#[must_use]
pub fn format_preview(preview: Option<&SharePreview>) -> String {
    preview.map_or_else(
        || NO_PREVIEW_TEXT.to_string(),
        |preview| format_coordinate(preview.coordinate),
    )
}

impl fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locating => f.write_str(LOCATING_TEXT),
            Self::Located(coordinate) => f.write_str(&format_coordinate(*coordinate)),
            Self::Failed(error) => write!(f, "{error}"),
        }
    }
}
