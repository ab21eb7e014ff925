use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable layer handle. Allocated once, never reused.
pub type LayerId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerState {
    Live,
    Failed,
    Removed,
}

/// One entry of the initial payload embedded in the page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerPayload {
    pub name: String,
    pub source: String,
    #[serde(default)]
    pub features: usize,
    pub data: Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn point(lng: f64, lat: f64) -> Bounds {
        Bounds { south: lat, west: lng, north: lat, east: lng }
    }

    pub fn extend(&mut self, lng: f64, lat: f64) {
        self.south = self.south.min(lat);
        self.north = self.north.max(lat);
        self.west = self.west.min(lng);
        self.east = self.east.max(lng);
    }

    pub fn is_finite(&self) -> bool {
        self.south.is_finite() && self.west.is_finite() && self.north.is_finite() && self.east.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub lat: f64,
    pub lng: f64,
    pub zoom: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport { lat: 55.75, lng: 37.6, zoom: 10 }
    }
}

/// Resolved rendering style of one feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

/// Stroke and fill opacity pushed to the surface for one feature.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureOpacity {
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl FeatureOpacity {
    pub fn scaled(&self, multiplier: f64) -> FeatureOpacity {
        FeatureOpacity { opacity: self.opacity * multiplier, fill_opacity: self.fill_opacity * multiplier }
    }
}
