use crate::interop::{array, error_text, to_js};
use geocmp_core::basemap::BaseLayer;
use geocmp_core::model::FeatureOpacity;
use geocmp_core::{Bounds, FeatureRender, LayerId, MapSurface};
use geocmp_core::geojson::FeatureCollection;
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

/// Map surface backed by a JS object of callbacks (the Leaflet adapter).
///
/// Expected members: `buildOverlay(id, data, features)`, `show(overlay)`,
/// `hide(overlay)`, `destroy(overlay)`, `restyle(overlay, opacities)`,
/// `fitBounds(bounds, padding)`, `setBaseLayer(layer)`,
/// `setBaseOpacity(opacity)`, `setBackground(color)`.
pub struct JsSurface {
    callbacks: Object,
}

impl JsSurface {
    pub fn new(callbacks: JsValue) -> Result<JsSurface, String> {
        let callbacks: Object = callbacks.dyn_into().map_err(|_| "surface callbacks must be an object".to_string())?;
        Ok(JsSurface { callbacks })
    }

    fn call(&self, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
        let f: Function = Reflect::get(&self.callbacks, &JsValue::from_str(name))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("surface callback '{}' is missing", name)))?;
        f.apply(&self.callbacks, &array(args))
    }

    // Rendering side effects have no caller to report to; log and go on.
    fn notify(&self, name: &str, args: &[JsValue]) {
        if let Err(e) = self.call(name, args) {
            web_sys::console::error_2(&JsValue::from_str(&format!("geocmp: {} failed:", name)), &e);
        }
    }
}

impl MapSurface for JsSurface {
    type Overlay = JsValue;

    fn build_overlay(&mut self, id: LayerId, data: &FeatureCollection, features: &[FeatureRender]) -> Result<JsValue, String> {
        let overlay = self
            .call("buildOverlay", &[JsValue::from_f64(id as f64), to_js(data), to_js(features)])
            .map_err(|e| error_text(&e))?;
        if overlay.is_undefined() || overlay.is_null() {
            return Err("buildOverlay returned no overlay".to_string());
        }
        Ok(overlay)
    }

    fn show(&mut self, overlay: &JsValue) {
        self.notify("show", &[overlay.clone()]);
    }

    fn hide(&mut self, overlay: &JsValue) {
        self.notify("hide", &[overlay.clone()]);
    }

    fn destroy(&mut self, overlay: JsValue) {
        self.notify("destroy", &[overlay]);
    }

    fn restyle(&mut self, overlay: &JsValue, opacities: &[FeatureOpacity]) {
        self.notify("restyle", &[overlay.clone(), to_js(opacities)]);
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: u32) {
        self.notify("fitBounds", &[to_js(&bounds), JsValue::from_f64(padding as f64)]);
    }

    fn set_base_layer(&mut self, layer: &BaseLayer) {
        self.notify("setBaseLayer", &[to_js(layer)]);
    }

    fn set_base_opacity(&mut self, opacity: f64) {
        self.notify("setBaseOpacity", &[JsValue::from_f64(opacity)]);
    }

    fn set_background(&mut self, color: &str) {
        self.notify("setBackground", &[JsValue::from_str(color)]);
    }
}
