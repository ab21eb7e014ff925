use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocmpError {
    #[error("failed to parse GeoJSON: {0}")]
    Parse(String),

    #[error("GeoJSON document is not a FeatureCollection")]
    NotFeatureCollection,

    #[error("parameter '{param}' out of range [{min}, {max}]: got {got}")]
    OutOfRange {
        param: &'static str,
        min: f64,
        max: f64,
        got: f64,
    },

    #[error("parameter '{0}' must be finite")]
    NonFinite(&'static str),

    #[error("unknown base layer '{0}'")]
    UnknownBaseLayer(String),

    #[error("failed to build overlay: {0}")]
    Overlay(String),

    #[error("invalid viewer config: {0}")]
    Config(String),
}

impl GeocmpError {
    /// Stable machine-readable code, used by the wasm envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            GeocmpError::Parse(_) => "parse",
            GeocmpError::NotFeatureCollection => "not_feature_collection",
            GeocmpError::OutOfRange { .. } => "out_of_range",
            GeocmpError::NonFinite(_) => "non_finite",
            GeocmpError::UnknownBaseLayer(_) => "unknown_base_layer",
            GeocmpError::Overlay(_) => "overlay",
            GeocmpError::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, GeocmpError>;

/// Checks that `got` is finite and within `[min, max]`.
pub fn check_unit_range(param: &'static str, got: f64, min: f64, max: f64) -> Result<f64> {
    if !got.is_finite() {
        return Err(GeocmpError::NonFinite(param));
    }
    if got < min || got > max {
        return Err(GeocmpError::OutOfRange { param, min, max, got });
    }
    Ok(got)
}
