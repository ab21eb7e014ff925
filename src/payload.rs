//! Reads the input files into the page's initial layer payload.

use crate::messages;
use geocmp_core::collection::{self, is_feature_collection};
use geocmp_core::style::bake_styles;
use geocmp_core::LayerPayload;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads, validates and styles every file. Unusable files are skipped with a
/// warning, so the result may be empty.
pub fn make_layers(paths: &[PathBuf]) -> Vec<LayerPayload> {
    let common = common_dir(paths);
    let mut layers = Vec::with_capacity(paths.len());
    for path in paths {
        match load_layer(path, &common) {
            Ok(layer) => {
                debug!(name = %layer.name, features = layer.features, "layer loaded");
                layers.push(layer);
            }
            Err(reason) => warn!("{}: {}", path.display(), reason),
        }
    }
    layers
}

fn load_layer(path: &Path, common: &Path) -> Result<LayerPayload, String> {
    let text = fs::read_to_string(path).map_err(messages::cannot_read)?;
    let mut data: Value = serde_json::from_str(&text).map_err(messages::invalid_json)?;
    if !is_feature_collection(&data) {
        return Err(messages::NOT_FEATURE_COLLECTION.to_string());
    }
    // Matches the viewer's load-time parse
    collection::parse_value(data.clone()).map_err(messages::invalid_geojson)?;
    let mut features = 0;
    if let Some(Value::Array(list)) = data.get_mut("features") {
        features = list.len();
        for feature in list.iter_mut() {
            bake_styles(feature);
        }
    }
    Ok(LayerPayload { name: display_name(path, common), source: path.display().to_string(), features, data })
}

/// Deepest directory containing every path's parent.
pub fn common_dir(paths: &[PathBuf]) -> PathBuf {
    let mut iter = paths.iter().filter_map(|p| p.parent());
    let Some(first) = iter.next() else { return PathBuf::new() };
    let mut common: Vec<_> = first.components().collect();
    for parent in iter {
        let shared = common.iter().zip(parent.components()).take_while(|(a, b)| **a == *b).count();
        common.truncate(shared);
    }
    common.iter().collect()
}

fn display_name(path: &Path, common: &Path) -> String {
    let rel = path.strip_prefix(common).unwrap_or(path);
    rel.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/")
}
