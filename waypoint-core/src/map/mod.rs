//! Map configuration and the renderer contract.
//!
//! Rendering and tile transport happen outside this crate. This module
//! holds what the renderer is told:
//!
//! - [`OverlaySet`]: per-overlay visibility and opacity
//! - [`MapStyle`]: the fixed base layer and overlay sources
//! - [`MapView`] / [`MapBinding`]: the lazily created renderer handle
//! - [`TileCoord`]: tile addressing for URL templates

mod overlay;
pub mod style;
mod tiles;
mod view;

pub use overlay::{LayerPaint, OverlayId, OverlaySet, OverlayState, Visibility, OPACITY_STEP};
pub use style::{MapStyle, TileSource};
pub use tiles::{expand_template, TileCoord, MAX_ZOOM, TILE_SIZE};
pub use view::{
    ControlPosition, MapBinding, MapInit, MapOptions, MapView, DEFAULT_MARKER_COLOR, DEFAULT_ZOOM,
};
