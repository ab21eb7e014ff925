//! FeatureCollection validation and extent.

use crate::error::{GeocmpError, Result};
use crate::limits;
use crate::model::Bounds;
use geojson::{FeatureCollection, GeoJson, Geometry};
use serde_json::Value;

/// Shallow shape check: an object with `type: FeatureCollection` and a
/// `features` array. Geometry contents are not inspected.
pub fn is_feature_collection(v: &Value) -> bool {
    let Some(obj) = v.as_object() else { return false };
    obj.get("type").and_then(Value::as_str) == Some("FeatureCollection")
        && obj.get("features").map_or(false, Value::is_array)
}

pub fn parse_value(v: Value) -> Result<FeatureCollection> {
    if !is_feature_collection(&v) {
        return Err(GeocmpError::NotFeatureCollection);
    }
    let gj = GeoJson::from_json_value(v).map_err(|e| GeocmpError::Parse(e.to_string()))?;
    let fc = FeatureCollection::try_from(gj).map_err(|_| GeocmpError::NotFeatureCollection)?;
    if fc.features.len() > limits::MAX_FEATURES_PER_LAYER {
        return Err(GeocmpError::Parse(format!(
            "{} features exceed the per-layer cap of {}",
            fc.features.len(),
            limits::MAX_FEATURES_PER_LAYER
        )));
    }
    Ok(fc)
}

pub fn parse_str(text: &str) -> Result<FeatureCollection> {
    let v: Value = serde_json::from_str(text).map_err(|e| GeocmpError::Parse(e.to_string()))?;
    parse_value(v)
}

/// Bounding box over every position of the collection. None when the
/// collection has no positions or any coordinate is non-finite.
pub fn bounds(fc: &FeatureCollection) -> Option<Bounds> {
    let mut acc: Option<Bounds> = None;
    for f in &fc.features {
        if let Some(g) = &f.geometry {
            extend_geometry(&mut acc, g);
        }
    }
    acc.filter(Bounds::is_finite)
}

fn extend_geometry(acc: &mut Option<Bounds>, g: &Geometry) {
    use geojson::Value as G;
    match &g.value {
        G::Point(p) => extend_position(acc, p),
        G::MultiPoint(ps) | G::LineString(ps) => ps.iter().for_each(|p| extend_position(acc, p)),
        G::MultiLineString(lines) | G::Polygon(lines) => {
            lines.iter().flatten().for_each(|p| extend_position(acc, p))
        }
        G::MultiPolygon(polys) => polys.iter().flatten().flatten().for_each(|p| extend_position(acc, p)),
        G::GeometryCollection(gs) => gs.iter().for_each(|g| extend_geometry(acc, g)),
    }
}

fn extend_position(acc: &mut Option<Bounds>, p: &[f64]) {
    if p.len() < 2 {
        return;
    }
    let (lng, lat) = (p[0], p[1]);
    match acc {
        Some(b) => b.extend(lng, lat),
        None => *acc = Some(Bounds::point(lng, lat)),
    }
}

/// True when the feature's geometry is a Point.
pub fn is_point(f: &geojson::Feature) -> bool {
    matches!(f.geometry.as_ref().map(|g| &g.value), Some(geojson::Value::Point(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shape_check_rejects_non_collections() {
        assert!(!is_feature_collection(&json!([])));
        assert!(!is_feature_collection(&json!({"type": "Feature"})));
        assert!(!is_feature_collection(&json!({"type": "FeatureCollection", "features": {}})));
        assert!(is_feature_collection(&json!({"type": "FeatureCollection", "features": []})));
    }

    #[test]
    fn empty_collection_has_no_bounds() {
        let fc = parse_value(json!({"type": "FeatureCollection", "features": []})).unwrap();
        assert!(bounds(&fc).is_none());
    }

    #[test]
    fn bounds_cover_nested_geometries() {
        let fc = parse_value(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [37.0, 55.0]}},
                {"type": "Feature", "properties": {}, "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[36.0, 54.0], [38.5, 54.0], [38.5, 56.0], [36.0, 54.0]]]
                }},
                {"type": "Feature", "properties": {}, "geometry": null}
            ]
        }))
        .unwrap();
        let b = bounds(&fc).unwrap();
        assert_eq!(b, Bounds { south: 54.0, west: 36.0, north: 56.0, east: 38.5 });
    }

    #[test]
    fn malformed_text_is_parse_error() {
        assert!(matches!(parse_str("{not json"), Err(GeocmpError::Parse(_))));
        assert_eq!(parse_str(r#"{"type":"Point","coordinates":[0,0]}"#), Err(GeocmpError::NotFeatureCollection));
    }
}
