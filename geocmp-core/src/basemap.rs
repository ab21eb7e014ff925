use serde::{Deserialize, Serialize};

/// Tile provider definition handed to the surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseLayer {
    pub key: String,
    pub name: String,
    pub url: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl BaseLayer {
    fn new(key: &str, name: &str, url: &str, attribution: &str, max_zoom: u8) -> Self {
        BaseLayer {
            key: key.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            attribution: attribution.to_string(),
            max_zoom,
        }
    }
}

pub fn default_base_layers() -> Vec<BaseLayer> {
    vec![
        BaseLayer::new(
            "osm",
            "OSM",
            "https://{s}.tile.osm.org/{z}/{x}/{y}.png",
            "&copy; <a href=\"https://osm.org/copyright\">OpenStreetMap</a>",
            19,
        ),
        BaseLayer::new(
            "satellite",
            "Satellite",
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
            "&copy; Esri",
            19,
        ),
        BaseLayer::new(
            "topo",
            "Topo",
            "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
            "&copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a>",
            17,
        ),
        BaseLayer::new(
            "cartodb",
            "CartoDB",
            "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png",
            "&copy; <a href=\"https://carto.com/\">CartoDB</a>",
            19,
        ),
    ]
}

/// Base map settings: selected provider, tile opacity, background tone.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseMapState {
    pub selected: String,
    pub opacity: f64,
    pub dark_background: bool,
}

impl BaseMapState {
    pub fn new(selected: &str) -> Self {
        BaseMapState { selected: selected.to_string(), opacity: 1.0, dark_background: false }
    }

    pub fn background_color(&self) -> &'static str {
        if self.dark_background { "#2d2d2d" } else { "#e0e0e0" }
    }
}
