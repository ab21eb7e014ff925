//! Feature → style policy.
//!
//! Properties are looked up in priority order; the first key present with a
//! non-null value wins. Numbers accept JSON numbers and numeric strings.

use crate::collection::is_point;
use crate::model::{FeatureOpacity, FeatureStyle};
use geojson::{Feature, JsonObject};
use serde_json::Value;
use tracing::warn;

pub const DEFAULT_COLOR: &str = "#3388ff";

const PATH_STROKE_KEYS: &[&str] = &["stroke", "stroke-color", "strokeColor", "color", "marker-color"];
const PATH_FILL_KEYS: &[&str] = &["fill", "fill-color", "fillColor", "marker-color"];
const MARKER_COLOR_KEYS: &[&str] = &["marker-color", "markerColor", "stroke", "stroke-color", "color"];
const MARKER_FILL_KEYS: &[&str] = &["fill", "fill-color", "fillColor"];
const FILL_OPACITY_KEYS: &[&str] = &["fill-opacity", "fillOpacity"];
const WEIGHT_KEYS: &[&str] = &["stroke-width", "strokeWidth"];

const PATH_WEIGHT: f64 = 2.0;
const PATH_OPACITY: f64 = 0.8;
const PATH_FILL_OPACITY: f64 = 0.5;
const MARKER_WEIGHT: f64 = 1.0;
const MARKER_OPACITY: f64 = 1.0;
const MARKER_FILL_OPACITY: f64 = 0.9;
const MARKER_RADIUS: f64 = 6.0;
const MARKER_RADIUS_LARGE: f64 = 12.0;
const MARKER_RADIUS_SMALL: f64 = 4.0;

fn lookup<'a>(props: Option<&'a JsonObject>, keys: &[&str]) -> Option<&'a Value> {
    let props = props?;
    keys.iter().find_map(|k| props.get(*k).filter(|v| !v.is_null()))
}

fn as_color(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

pub fn as_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn number_or(v: Option<&Value>, fallback: f64) -> f64 {
    v.and_then(as_number).unwrap_or(fallback)
}

/// Style for lines and polygons. An explicit `style` member on the feature
/// overrides the derived values key by key.
pub fn path_style(feature: &Feature) -> FeatureStyle {
    let props = feature.properties.as_ref();
    let color = as_color(lookup(props, PATH_STROKE_KEYS)).unwrap_or_else(|| DEFAULT_COLOR.to_string());
    let fill_color = as_color(lookup(props, PATH_FILL_KEYS)).unwrap_or_else(|| color.clone());
    let mut style = FeatureStyle {
        color,
        weight: number_or(lookup(props, WEIGHT_KEYS), PATH_WEIGHT),
        opacity: PATH_OPACITY,
        fill_color,
        fill_opacity: number_or(lookup(props, FILL_OPACITY_KEYS), PATH_FILL_OPACITY),
        radius: None,
    };
    if let Some(Value::Object(explicit)) = feature.foreign_members.as_ref().and_then(|m| m.get("style")) {
        apply_explicit(&mut style, explicit);
    }
    style
}

fn apply_explicit(style: &mut FeatureStyle, explicit: &JsonObject) {
    if let Some(c) = as_color(explicit.get("color")) {
        style.color = c;
    }
    if let Some(c) = as_color(explicit.get("fillColor")) {
        style.fill_color = c;
    }
    if let Some(w) = explicit.get("weight").and_then(as_number) {
        style.weight = w;
    }
    if let Some(o) = explicit.get("opacity").and_then(as_number) {
        style.opacity = o;
    }
    if let Some(o) = explicit.get("fillOpacity").and_then(as_number) {
        style.fill_opacity = o;
    }
}

/// Style for point features drawn as circle markers.
pub fn marker_style(feature: &Feature) -> FeatureStyle {
    let props = feature.properties.as_ref();
    let color = as_color(lookup(props, MARKER_COLOR_KEYS)).unwrap_or_else(|| DEFAULT_COLOR.to_string());
    let fill_color = as_color(lookup(props, MARKER_FILL_KEYS)).unwrap_or_else(|| color.clone());
    let radius = match props.and_then(|p| p.get("marker-size")).and_then(Value::as_str) {
        Some("large") => MARKER_RADIUS_LARGE,
        Some("small") => MARKER_RADIUS_SMALL,
        _ => number_or(props.and_then(|p| p.get("radius")), MARKER_RADIUS),
    };
    FeatureStyle {
        color,
        weight: number_or(lookup(props, WEIGHT_KEYS), MARKER_WEIGHT),
        opacity: MARKER_OPACITY,
        fill_color,
        fill_opacity: number_or(lookup(props, FILL_OPACITY_KEYS), MARKER_FILL_OPACITY),
        radius: Some(radius),
    }
}

pub fn feature_style(feature: &Feature) -> FeatureStyle {
    if is_point(feature) { marker_style(feature) } else { path_style(feature) }
}

impl From<&FeatureStyle> for FeatureOpacity {
    fn from(s: &FeatureStyle) -> Self {
        FeatureOpacity { opacity: s.opacity, fill_opacity: s.fill_opacity }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Popup body: one table row per property.
pub fn popup_html(props: Option<&JsonObject>) -> String {
    let mut html = String::from("<table class=\"simple-table\">");
    for (k, v) in props.into_iter().flatten() {
        let value = match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        html.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
            escape_html(k),
            escape_html(&value)
        ));
    }
    html.push_str("</table>");
    html
}

/// Copies simplestyle properties into the feature's `style` member, so the
/// page does not need to re-derive them. Returns the number of properties
/// that could not be converted.
pub fn bake_styles(feature: &mut Value) -> usize {
    let Some(obj) = feature.as_object_mut() else { return 0 };
    let props = match obj.get("properties") {
        Some(Value::Object(p)) => p.clone(),
        _ => JsonObject::new(),
    };
    let mut skipped = 0;
    let mut baked = JsonObject::new();
    for (key, value) in &props {
        let (target, numeric) = match key.as_str() {
            "marker-color" | "stroke" => ("color", false),
            "fill" => ("fillColor", false),
            "fill-opacity" => ("fillOpacity", true),
            "stroke-width" => ("weight", true),
            _ => continue,
        };
        if !numeric {
            baked.insert(target.to_string(), value.clone());
            continue;
        }
        match as_number(value) {
            Some(n) => {
                baked.insert(target.to_string(), Value::from(n));
            }
            None => {
                warn!("cannot process style parameter {}={}", key, value);
                skipped += 1;
            }
        }
    }
    let style = obj.entry("style").or_insert_with(|| Value::Object(JsonObject::new()));
    if let Value::Object(style) = style {
        style.extend(baked);
    }
    skipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(v: Value) -> Feature {
        Feature::from_json_value(v).unwrap()
    }

    #[test]
    fn stroke_precedes_color() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]},
            "properties": {"color": "#00ff00", "stroke": "#ff0000"}
        }));
        let s = path_style(&f);
        assert_eq!(s.color, "#ff0000");
        assert_eq!(s.fill_color, "#ff0000");
        assert_eq!(s.weight, 2.0);
        assert_eq!(s.fill_opacity, 0.5);
    }

    #[test]
    fn numeric_fallbacks() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]},
            "properties": {"stroke-width": "wide", "fill-opacity": "0.25"}
        }));
        let s = path_style(&f);
        assert_eq!(s.weight, 2.0);
        assert_eq!(s.fill_opacity, 0.25);
    }

    #[test]
    fn explicit_style_overrides_properties() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]},
            "properties": {"stroke": "#ff0000"},
            "style": {"color": "#123456", "weight": 5}
        }));
        let s = path_style(&f);
        assert_eq!(s.color, "#123456");
        assert_eq!(s.weight, 5.0);
    }

    #[test]
    fn marker_size_and_radius() {
        let large = feature(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0, 0]},
            "properties": {"marker-size": "large", "marker-color": "#abcdef"}
        }));
        let s = feature_style(&large);
        assert_eq!(s.radius, Some(12.0));
        assert_eq!(s.color, "#abcdef");
        assert_eq!(s.fill_opacity, 0.9);

        let custom = feature(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0, 0]},
            "properties": {"radius": "9"}
        }));
        assert_eq!(marker_style(&custom).radius, Some(9.0));
    }

    #[test]
    fn popup_escapes_markup() {
        let props = json!({"name": "<b>x</b>", "n": 3});
        let html = popup_html(props.as_object());
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(html.contains("<td>3</td>"));
    }

    #[test]
    fn bake_maps_simplestyle_keys() {
        let mut f = json!({
            "type": "Feature",
            "properties": {"fill": "#111111", "stroke-width": "3", "fill-opacity": "lots"}
        });
        assert_eq!(bake_styles(&mut f), 1);
        assert_eq!(f["style"], json!({"fillColor": "#111111", "weight": 3.0}));
    }
}
