//! Overlay visibility and opacity state.
//!
//! Each raster overlay is toggled and faded independently. Overlays never
//! interact; blending where they overlap is up to the renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Granularity of the opacity sliders.
pub const OPACITY_STEP: f64 = 0.05;

/// The toggleable raster overlays drawn above the base map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayId {
    /// USGS shaded relief.
    Hillshade,
    /// USGS topographic base.
    Topo,
    /// ESA WorldCover land-cover classification.
    #[serde(rename = "worldcover")]
    WorldCover,
}

impl OverlayId {
    /// All overlays, in draw order (bottom to top).
    pub const ALL: [Self; 3] = [Self::Hillshade, Self::Topo, Self::WorldCover];

    /// Layer and source id in the map style.
    #[must_use]
    pub const fn layer_id(self) -> &'static str {
        match self {
            Self::Hillshade => "usgs_hillshade",
            Self::Topo => "usgs_topo",
            Self::WorldCover => "worldcover",
        }
    }

    /// Initial state of this overlay in a fresh session.
    #[must_use]
    pub const fn default_state(self) -> OverlayState {
        match self {
            Self::Hillshade => OverlayState {
                visible: true,
                opacity: 0.6,
            },
            Self::Topo | Self::WorldCover => OverlayState {
                visible: false,
                opacity: 0.0,
            },
        }
    }
}

/// Visibility and opacity of a single overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayState {
    /// Whether the layer is drawn at all.
    pub visible: bool,
    /// Raster opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Layout visibility value understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Layer is drawn.
    Visible,
    /// Layer is not drawn.
    #[serde(rename = "none")]
    Hidden,
}

impl Visibility {
    /// MapLibre layout string for this value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "none",
        }
    }
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible {
            Self::Visible
        } else {
            Self::Hidden
        }
    }
}

/// Paint parameters for one overlay layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerPaint {
    /// Overlay the parameters belong to.
    pub overlay: OverlayId,
    /// Layer id in the map style.
    pub layer_id: &'static str,
    /// Layout visibility.
    pub visibility: Visibility,
    /// Raster opacity.
    pub opacity: f64,
}

/// Keyed overlay state, one entry per [`OverlayId`].
///
/// Missing entries (e.g. from a partial config file) fall back to
/// [`OverlayId::default_state`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlaySet {
    overlays: BTreeMap<OverlayId, OverlayState>,
}

impl Default for OverlaySet {
    fn default() -> Self {
        Self {
            overlays: OverlayId::ALL
                .into_iter()
                .map(|id| (id, id.default_state()))
                .collect(),
        }
    }
}

impl OverlaySet {
    /// Current state of `id`.
    #[must_use]
    pub fn get(&self, id: OverlayId) -> OverlayState {
        self.overlays
            .get(&id)
            .copied()
            .unwrap_or_else(|| id.default_state())
    }

    /// Shows or hides an overlay. Returns true if the state changed.
    pub fn set_visible(&mut self, id: OverlayId, visible: bool) -> bool {
        let mut state = self.get(id);
        if state.visible == visible {
            return false;
        }
        state.visible = visible;
        self.overlays.insert(id, state);
        true
    }

    /// Sets an overlay's opacity, clamped into `[0, 1]`.
    ///
    /// Returns true if the state changed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOpacity`] for NaN.
    #[allow(clippy::float_cmp)] // Exact comparison detects a no-op slider move.
    pub fn set_opacity(&mut self, id: OverlayId, opacity: f64) -> Result<bool, ConfigError> {
        if opacity.is_nan() {
            return Err(ConfigError::InvalidOpacity(opacity));
        }
        let opacity = opacity.clamp(0.0, 1.0);
        let mut state = self.get(id);
        if state.opacity == opacity {
            return Ok(false);
        }
        state.opacity = opacity;
        self.overlays.insert(id, state);
        Ok(true)
    }

    /// Checks that every stored opacity lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOpacity`] with the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self
            .overlays
            .values()
            .find(|state| !(0.0..=1.0).contains(&state.opacity))
        {
            Some(state) => Err(ConfigError::InvalidOpacity(state.opacity)),
            None => Ok(()),
        }
    }

    /// Paint parameters for a single overlay.
    #[must_use]
    pub fn paint_for(&self, id: OverlayId) -> LayerPaint {
        let state = self.get(id);
        LayerPaint {
            overlay: id,
            layer_id: id.layer_id(),
            visibility: state.visible.into(),
            opacity: state.opacity,
        }
    }

    /// Paint parameters for every overlay, in draw order.
    #[must_use]
    pub fn paint_parameters(&self) -> Vec<LayerPaint> {
        OverlayId::ALL.into_iter().map(|id| self.paint_for(id)).collect()
    }
}
