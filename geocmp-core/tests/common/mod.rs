#![allow(dead_code)]

use geocmp_core::basemap::BaseLayer;
use geocmp_core::model::FeatureOpacity;
use geocmp_core::{Bounds, FeatureRender, LayerId, LayerPayload, MapSurface};
use geojson::FeatureCollection;
use serde_json::{json, Value};
use std::collections::{BTreeSet, HashSet};

/// Surface double that records every call. Overlay handles are layer ids.
#[derive(Default)]
pub struct RecordingSurface {
    pub built: Vec<LayerId>,
    pub shown: BTreeSet<LayerId>,
    pub destroyed: Vec<LayerId>,
    pub restyles: Vec<(LayerId, Vec<FeatureOpacity>)>,
    pub fits: Vec<Bounds>,
    pub base_layer: Option<String>,
    pub base_opacity: Option<f64>,
    pub background: Option<String>,
    pub fail_names: HashSet<String>,
}

impl MapSurface for RecordingSurface {
    type Overlay = LayerId;

    fn build_overlay(&mut self, id: LayerId, data: &FeatureCollection, features: &[FeatureRender]) -> Result<LayerId, String> {
        assert_eq!(data.features.len(), features.len());
        let poisoned = data.features.iter().any(|f| {
            f.properties
                .as_ref()
                .and_then(|p| p.get("name"))
                .and_then(Value::as_str)
                .map_or(false, |n| self.fail_names.contains(n))
        });
        if poisoned {
            return Err("renderer refused feature".to_string());
        }
        self.built.push(id);
        Ok(id)
    }

    fn show(&mut self, overlay: &LayerId) {
        self.shown.insert(*overlay);
    }

    fn hide(&mut self, overlay: &LayerId) {
        self.shown.remove(overlay);
    }

    fn destroy(&mut self, overlay: LayerId) {
        self.shown.remove(&overlay);
        self.destroyed.push(overlay);
    }

    fn restyle(&mut self, overlay: &LayerId, opacities: &[FeatureOpacity]) {
        self.restyles.push((*overlay, opacities.to_vec()));
    }

    fn fit_bounds(&mut self, bounds: Bounds, _padding: u32) {
        self.fits.push(bounds);
    }

    fn set_base_layer(&mut self, layer: &BaseLayer) {
        self.base_layer = Some(layer.key.clone());
    }

    fn set_base_opacity(&mut self, opacity: f64) {
        self.base_opacity = Some(opacity);
    }

    fn set_background(&mut self, color: &str) {
        self.background = Some(color.to_string());
    }
}

pub fn points(n: usize) -> Value {
    let features: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "type": "Feature",
                "properties": {"name": format!("p{}", i)},
                "geometry": {"type": "Point", "coordinates": [37.0 + i as f64 * 0.01, 55.0]}
            })
        })
        .collect();
    json!({"type": "FeatureCollection", "features": features})
}

pub fn polygon() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"fill-opacity": 0.4},
            "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}
        }]
    })
}

pub fn payload(name: &str, data: Value) -> LayerPayload {
    let features = data["features"].as_array().map_or(0, |a| a.len());
    LayerPayload { name: name.to_string(), source: format!("/data/{}", name), features, data }
}
