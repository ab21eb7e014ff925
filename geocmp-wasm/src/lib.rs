use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod surface;

pub use surface::JsSurface;

#[wasm_bindgen]
pub struct Viewer { pub(crate) inner: geocmp_core::LayerSetController<JsSurface> }

impl Viewer {
    pub fn rs_new(surface: JsSurface, config: geocmp_core::ViewerConfig) -> Result<Viewer, geocmp_core::GeocmpError> {
        Ok(Viewer { inner: geocmp_core::LayerSetController::new(surface, config)? })
    }
    pub fn rs_active(&self) -> Option<u32> { self.inner.active() }
}
