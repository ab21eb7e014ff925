//! User-facing CLI text, kept in one place so it can be translated.

pub const FATAL_ERROR: &str = "Fatal error";
pub const NO_GEOJSON_DATA: &str = "No GeoJSON data found";
pub const PATTERN_REQUIRED: &str = "at least one file or glob pattern is required";

pub const NOT_FEATURE_COLLECTION: &str = "not a GeoJSON FeatureCollection";

pub fn cannot_read(err: impl std::fmt::Display) -> String {
    format!("cannot read file: {}", err)
}

pub fn invalid_json(err: impl std::fmt::Display) -> String {
    format!("invalid JSON: {}", err)
}

pub fn invalid_geojson(err: impl std::fmt::Display) -> String {
    format!("invalid GeoJSON: {}", err)
}

pub const NO_TEMP_FILES: &str = "No temporary files found";
pub const DRY_RUN: &str = "\nDry run mode - no files deleted";

pub fn found_temp_files(count: usize) -> String {
    format!("Found {} temporary file(s):", count)
}

pub fn temp_file_entry(name: &str, size: &str) -> String {
    format!("  {} ({} bytes)", name, size)
}

pub fn deleted_temp_files(count: usize, freed: &str) -> String {
    format!("\nDeleted {} file(s), freed {} bytes", count, freed)
}
