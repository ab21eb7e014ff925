// Centralized bounds for values coming from the URL, dropped files and sliders

// Dropped file caps
pub const MAX_DROP_FILE_BYTES: usize = 256 * 1024 * 1024;
pub const MAX_FEATURES_PER_LAYER: usize = 2_000_000;

// Hotkeys cover the first ten list positions (1..9, then 0)
pub const HOTKEY_SLOTS: usize = 10;

// Numeric bounds
pub const LAT_MAX: f64 = 90.0;
pub const LNG_MAX: f64 = 180.0;
pub const ZOOM_MIN: i32 = 0;
pub const OPACITY_MIN: f64 = 0.0;
pub const OPACITY_MAX: f64 = 1.0;

#[inline]
pub fn in_lat_bounds(x: f64) -> bool { x.is_finite() && x.abs() <= LAT_MAX }

#[inline]
pub fn in_lng_bounds(x: f64) -> bool { x.is_finite() && x.abs() <= LNG_MAX }

#[inline]
pub fn in_zoom_bounds(z: i32, max_zoom: i32) -> bool { z >= ZOOM_MIN && z <= max_zoom }
