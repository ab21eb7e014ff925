use crate::basemap::{default_base_layers, BaseLayer};
use crate::error::{GeocmpError, Result};
use crate::limits;
use crate::model::Viewport;
use serde::{Deserialize, Serialize};

/// Viewer settings. Every field has a default, so a partial JSON object
/// (or none at all) is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    pub default_viewport: Viewport,
    pub max_zoom: i32,
    /// Padding in pixels when fitting the map to a layer.
    pub fit_padding: u32,
    pub base_layers: Vec<BaseLayer>,
    pub default_base_layer: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            default_viewport: Viewport::default(),
            max_zoom: 20,
            fit_padding: 20,
            base_layers: default_base_layers(),
            default_base_layer: "osm".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(text: &str) -> Result<ViewerConfig> {
        let cfg: ViewerConfig = serde_json::from_str(text).map_err(|e| GeocmpError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_zoom < limits::ZOOM_MIN {
            return Err(GeocmpError::Config(format!("maxZoom must be >= {}", limits::ZOOM_MIN)));
        }
        let vp = &self.default_viewport;
        if !limits::in_lat_bounds(vp.lat) || !limits::in_lng_bounds(vp.lng) {
            return Err(GeocmpError::Config("defaultViewport is outside the globe".to_string()));
        }
        if !limits::in_zoom_bounds(vp.zoom, self.max_zoom) {
            return Err(GeocmpError::Config(format!("defaultViewport.zoom must be within 0..={}", self.max_zoom)));
        }
        if self.base_layers.is_empty() {
            return Err(GeocmpError::Config("at least one base layer is required".to_string()));
        }
        if self.base_layer(&self.default_base_layer).is_none() {
            return Err(GeocmpError::UnknownBaseLayer(self.default_base_layer.clone()));
        }
        Ok(())
    }

    pub fn base_layer(&self, key: &str) -> Option<&BaseLayer> {
        self.base_layers.iter().find(|b| b.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ViewerConfig::from_json_str(r#"{"maxZoom": 18, "defaultBaseLayer": "topo"}"#).unwrap();
        assert_eq!(cfg.max_zoom, 18);
        assert_eq!(cfg.default_viewport, Viewport::default());
        assert_eq!(cfg.base_layers.len(), 4);
        assert_eq!(cfg.base_layer("topo").map(|b| b.max_zoom), Some(17));
    }

    #[test]
    fn unknown_default_base_layer_is_rejected() {
        let err = ViewerConfig::from_json_str(r#"{"defaultBaseLayer": "mars"}"#).unwrap_err();
        assert_eq!(err, GeocmpError::UnknownBaseLayer("mars".to_string()));
    }

    #[test]
    fn malformed_config_is_config_error() {
        assert!(matches!(ViewerConfig::from_json_str("[1,2]"), Err(GeocmpError::Config(_))));
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{"defaultViewport": {"lat": 95, "lng": 0, "zoom": 3}}"#),
            Err(GeocmpError::Config(_))
        ));
    }
}
