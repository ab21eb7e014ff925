pub mod basemap;
pub mod collection;
pub mod config;
pub mod controller;
pub mod dropzone;
pub mod error;
pub mod fragment;
pub mod keys;
pub mod limits;
pub mod model;
pub mod style;
pub mod surface;
pub mod view;

pub use config::ViewerConfig;
pub use controller::{Command, LayerRecord, LayerSetController, LoadReport};
pub use error::GeocmpError;
pub use model::{Bounds, LayerId, LayerPayload, LayerState, Viewport};
pub use surface::{FeatureRender, MapSurface};
pub use view::ViewState;
pub use geojson;
