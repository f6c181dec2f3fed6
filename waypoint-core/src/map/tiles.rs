//! Slippy-map tile addressing and URL template expansion.
//!
//! Tile sources are addressed either by `{z}/{x}/{y}` placeholders or, for
//! WMS endpoints, by a `{bbox-epsg-3857}` placeholder that expands to the
//! tile's Web Mercator bounding box.

use std::f64::consts::PI;

use crate::location::Coordinate;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Half the Web Mercator world width in meters.
const MERCATOR_ORIGIN_SHIFT: f64 = 20_037_508.342_789_244;

/// Highest zoom level with a representable tile grid.
pub const MAX_ZOOM: u8 = 24;

/// Address of a single tile in the XYZ scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Zoom level.
    pub z: u8,
    /// Column, 0 at the antimeridian going east.
    pub x: u32,
    /// Row, 0 at the northern edge going south.
    pub y: u32,
}

impl TileCoord {
    /// Finds the tile containing `coordinate` at `zoom`.
    ///
    /// Latitudes beyond the Web Mercator limit (~±85.05°) land in the
    /// first or last row. Zoom is capped at [`MAX_ZOOM`].
    ///
    /// # Examples
    ///
    /// ```
    /// use waypoint_core::location::Coordinate;
    /// use waypoint_core::map::TileCoord;
    ///
    /// let tile = TileCoord::containing(Coordinate::new(0.0, 0.0), 1);
    /// assert_eq!((tile.x, tile.y), (1, 1));
    /// ```
    #[must_use]
    pub fn containing(coordinate: Coordinate, zoom: u8) -> Self {
        let z = zoom.min(MAX_ZOOM);
        let n = f64::from(1_u32 << z);
        let max_index = n - 1.0;

        let x = ((coordinate.longitude() + 180.0) / 360.0 * n).floor();
        let lat_rad = coordinate.latitude().to_radians();
        let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor();

        Self {
            z,
            x: clamp_index(x, max_index),
            y: clamp_index(y, max_index),
        }
    }

    /// Web Mercator (EPSG:3857) bounds as `[min_x, min_y, max_x, max_y]`.
    #[must_use]
    pub fn bbox_epsg_3857(&self) -> [f64; 4] {
        let span = 2.0 * MERCATOR_ORIGIN_SHIFT / f64::from(1_u32 << self.z.min(MAX_ZOOM));
        let min_x = -MERCATOR_ORIGIN_SHIFT + f64::from(self.x) * span;
        let max_y = MERCATOR_ORIGIN_SHIFT - f64::from(self.y) * span;
        [min_x, max_y - span, min_x + span, max_y]
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_index(value: f64, max_index: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, max_index) as u32
}

/// Substitutes tile placeholders in a URL template.
///
/// Supported placeholders: `{z}`, `{x}`, `{y}` and `{bbox-epsg-3857}`.
/// Unknown placeholders are left untouched.
///
/// # Examples
///
/// ```
/// use waypoint_core::map::{expand_template, TileCoord};
///
/// let tile = TileCoord { z: 11, x: 327, y: 791 };
/// let url = expand_template("https://tile.openstreetmap.org/{z}/{x}/{y}.png", tile);
/// assert_eq!(url, "https://tile.openstreetmap.org/11/327/791.png");
/// ```
#[must_use]
pub fn expand_template(template: &str, tile: TileCoord) -> String {
    let mut url = template
        .replace("{z}", &tile.z.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string());

    if url.contains("{bbox-epsg-3857}") {
        let [min_x, min_y, max_x, max_y] = tile.bbox_epsg_3857();
        url = url.replace(
            "{bbox-epsg-3857}",
            &format!("{min_x},{min_y},{max_x},{max_y}"),
        );
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_zero_is_single_tile() {
        let tile = TileCoord::containing(Coordinate::new(37.7749, -122.4194), 0);
        assert_eq!(tile, TileCoord { z: 0, x: 0, y: 0 });
    }

    #[test]
    fn san_francisco_at_zoom_11() {
        let tile = TileCoord::containing(Coordinate::new(37.7749, -122.4194), 11);
        assert_eq!(tile, TileCoord { z: 11, x: 327, y: 791 });
    }

    #[test]
    fn poles_clamp_to_edge_rows() {
        let north = TileCoord::containing(Coordinate::new(90.0, 0.0), 3);
        let south = TileCoord::containing(Coordinate::new(-90.0, 0.0), 3);
        assert_eq!(north.y, 0);
        assert_eq!(south.y, 7);
    }

    #[test]
    fn antimeridian_clamps_to_last_column() {
        let east = TileCoord::containing(Coordinate::new(0.0, 180.0), 2);
        assert_eq!(east.x, 3);
    }

    #[test]
    fn world_bbox_at_zoom_zero() {
        let bbox = TileCoord { z: 0, x: 0, y: 0 }.bbox_epsg_3857();
        assert!((bbox[0] + MERCATOR_ORIGIN_SHIFT).abs() < 1e-6);
        assert!((bbox[1] + MERCATOR_ORIGIN_SHIFT).abs() < 1e-6);
        assert!((bbox[2] - MERCATOR_ORIGIN_SHIFT).abs() < 1e-6);
        assert!((bbox[3] - MERCATOR_ORIGIN_SHIFT).abs() < 1e-6);
    }

    #[test]
    fn bbox_quadrant_at_zoom_one() {
        let [min_x, min_y, max_x, max_y] = TileCoord { z: 1, x: 1, y: 0 }.bbox_epsg_3857();
        assert!(min_x.abs() < 1e-6);
        assert!(min_y.abs() < 1e-6);
        assert!((max_x - MERCATOR_ORIGIN_SHIFT).abs() < 1e-6);
        assert!((max_y - MERCATOR_ORIGIN_SHIFT).abs() < 1e-6);
    }

    #[test]
    fn expands_zyx_order() {
        let tile = TileCoord { z: 5, x: 10, y: 12 };
        let url = expand_template("https://example.test/tile/{z}/{y}/{x}", tile);
        assert_eq!(url, "https://example.test/tile/5/12/10");
    }

    #[test]
    fn expands_bbox_placeholder() {
        let tile = TileCoord { z: 0, x: 0, y: 0 };
        let url = expand_template("https://example.test/wms?bbox={bbox-epsg-3857}", tile);
        assert!(url.starts_with("https://example.test/wms?bbox=-20037508.34"));
        assert_eq!(url.matches(',').count(), 3);
        assert!(!url.contains('{'));
    }
}
