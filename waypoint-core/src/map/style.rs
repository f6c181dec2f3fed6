//! Fixed basemap and overlay configuration.
//!
//! One OpenStreetMap base layer and three toggleable raster overlays. The
//! URL templates and attributions are static configuration; nothing here
//! is computed from session state except the initial overlay paint.

use serde::Serialize;
use serde_json::{json, Value};

use super::overlay::{OverlayId, OverlaySet};
use super::tiles::{expand_template, TileCoord, TILE_SIZE};

/// A tiled raster source addressed by a URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileSource {
    /// Source id, also used as the layer id.
    pub id: &'static str,
    /// URL template with `{z}/{x}/{y}` or `{bbox-epsg-3857}` placeholders.
    pub template: &'static str,
    /// Tile edge in pixels.
    pub tile_size: u32,
    /// Attribution string shown by the renderer.
    pub attribution: &'static str,
}

impl TileSource {
    /// URL of a single tile from this source.
    #[must_use]
    pub fn tile_url(&self, tile: TileCoord) -> String {
        expand_template(self.template, tile)
    }
}

/// OpenStreetMap standard tiles.
pub const OSM: TileSource = TileSource {
    id: "osm",
    template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
    tile_size: TILE_SIZE,
    attribution: "© OpenStreetMap contributors",
};

/// USGS National Map shaded relief.
pub const USGS_HILLSHADE: TileSource = TileSource {
    id: "usgs_hillshade",
    template: "https://basemap.nationalmap.gov/arcgis/rest/services/USGSShadedReliefOnly/MapServer/tile/{z}/{y}/{x}",
    tile_size: TILE_SIZE,
    attribution: "USGS Shaded Relief",
};

/// USGS National Map topographic base.
pub const USGS_TOPO: TileSource = TileSource {
    id: "usgs_topo",
    template: "https://basemap.nationalmap.gov/arcgis/rest/services/USGSTopo/MapServer/tile/{z}/{y}/{x}",
    tile_size: TILE_SIZE,
    attribution: "USGS Topo",
};

/// ESA WorldCover demo tiles via EOX WMS.
pub const WORLDCOVER: TileSource = TileSource {
    id: "worldcover",
    template: "https://tiles.maps.eox.at/wms/?service=WMS&request=GetMap&layers=worldcover&styles=&format=image/png&transparent=true&version=1.1.1&height=256&width=256&srs=EPSG:3857&bbox={bbox-epsg-3857}",
    tile_size: TILE_SIZE,
    attribution: "ESA WorldCover (demo)",
};

/// Base layer plus overlays, in draw order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapStyle {
    /// Always-on base layer.
    pub base: TileSource,
    /// Toggleable overlays, bottom to top.
    pub overlays: Vec<(OverlayId, TileSource)>,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            base: OSM,
            overlays: vec![
                (OverlayId::Hillshade, USGS_HILLSHADE),
                (OverlayId::Topo, USGS_TOPO),
                (OverlayId::WorldCover, WORLDCOVER),
            ],
        }
    }
}

impl MapStyle {
    /// Source backing an overlay, if the style carries it.
    #[must_use]
    pub fn overlay_source(&self, overlay: OverlayId) -> Option<&TileSource> {
        self.overlays
            .iter()
            .find(|(id, _)| *id == overlay)
            .map(|(_, source)| source)
    }

    /// Every attribution string, base layer first.
    #[must_use]
    pub fn attributions(&self) -> Vec<&'static str> {
        std::iter::once(self.base.attribution)
            .chain(self.overlays.iter().map(|(_, source)| source.attribution))
            .collect()
    }

    /// Renders a MapLibre style (version 8) document.
    ///
    /// Overlay layers start with the paint and visibility held in
    /// `overlays`, so the first frame already matches the controls.
    #[must_use]
    pub fn to_style_json(&self, overlays: &OverlaySet) -> Value {
        let mut sources = serde_json::Map::new();
        let mut layers = vec![json!({
            "id": self.base.id,
            "type": "raster",
            "source": self.base.id,
        })];
        sources.insert(self.base.id.to_string(), raster_source(&self.base));

        for (overlay, source) in &self.overlays {
            sources.insert(source.id.to_string(), raster_source(source));
            let paint = overlays.paint_for(*overlay);
            layers.push(json!({
                "id": source.id,
                "type": "raster",
                "source": source.id,
                "layout": { "visibility": paint.visibility.as_str() },
                "paint": { "raster-opacity": paint.opacity },
            }));
        }

        json!({
            "version": 8,
            "sources": sources,
            "layers": layers,
        })
    }
}

fn raster_source(source: &TileSource) -> Value {
    json!({
        "type": "raster",
        "tiles": [source.template],
        "tileSize": source.tile_size,
        "attribution": source.attribution,
    })
}
