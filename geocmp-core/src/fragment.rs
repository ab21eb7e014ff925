//! Viewport <-> URL fragment (`#lat=..&lng=..&zoom=..`).

use crate::limits::{in_lat_bounds, in_lng_bounds, in_zoom_bounds};
use crate::model::Viewport;

/// Reads a viewport from a location hash. Each field that is missing or
/// invalid falls back to the matching field of `defaults`.
pub fn parse(hash: &str, defaults: Viewport, max_zoom: i32) -> Viewport {
    let mut vp = defaults;
    let body = hash.strip_prefix('#').unwrap_or(hash);
    for pair in body.split('&') {
        let Some((key, raw)) = pair.split_once('=') else { continue };
        let raw = raw.trim();
        match key {
            "lat" => {
                if let Some(lat) = raw.parse::<f64>().ok().filter(|v| in_lat_bounds(*v)) {
                    vp.lat = lat;
                }
            }
            "lng" => {
                if let Some(lng) = raw.parse::<f64>().ok().filter(|v| in_lng_bounds(*v)) {
                    vp.lng = lng;
                }
            }
            "zoom" => {
                if let Some(zoom) = parse_zoom(raw).filter(|z| in_zoom_bounds(*z, max_zoom)) {
                    vp.zoom = zoom;
                }
            }
            _ => {}
        }
    }
    vp
}

// Fractional zooms ("10.5") truncate like an integer parse of the prefix.
fn parse_zoom(raw: &str) -> Option<i32> {
    if let Ok(z) = raw.parse::<i32>() {
        return Some(z);
    }
    let z = raw.parse::<f64>().ok().filter(|z| z.is_finite())?;
    Some(z.trunc() as i32)
}

pub fn format(vp: &Viewport) -> String {
    format!("#lat={:.5}&lng={:.5}&zoom={}", vp.lat, vp.lng, vp.zoom)
}
