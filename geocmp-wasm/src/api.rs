use crate::interop::{new_obj, set_kv, to_js};
use crate::{error, JsSurface, Viewer};
use geocmp_core::dropzone::DroppedFile;
use geocmp_core::{LayerPayload, Viewport, ViewerConfig};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
impl Viewer {
    /// `surface` is the callbacks object; `config` is an optional partial
    /// viewer configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(surface: JsValue, config: JsValue) -> Result<Viewer, JsValue> {
        let surface = JsSurface::new(surface).map_err(|m| JsValue::from(js_sys::Error::new(&m)))?;
        let config = if config.is_undefined() || config.is_null() {
            ViewerConfig::default()
        } else {
            serde_wasm_bindgen::from_value::<ViewerConfig>(config)
                .map_err(|e| JsValue::from(js_sys::Error::new(&format!("invalid viewer config: {}", e))))?
        };
        Viewer::rs_new(surface, config).map_err(|e| error::to_exception(&e))
    }

    // Loading

    /// Loads the initial payload (a JSON array of layers). Failed layers
    /// are listed in the result and logged to the console.
    pub fn load_json(&mut self, text: &str) -> JsValue {
        let payload: Vec<LayerPayload> = match serde_json::from_str(text) {
            Ok(p) => p,
            Err(e) => return error::invalid_input("payload", e.to_string()),
        };
        let report = self.inner.load(payload);
        let failed = js_sys::Array::new();
        for (id, msg) in &report.failed {
            web_sys::console::error_1(&JsValue::from_str(&format!("Failed to load layer {}: {}", id, msg)));
            let f = new_obj();
            set_kv(&f, "id", &JsValue::from_f64(*id as f64));
            set_kv(&f, "error", &JsValue::from_str(msg));
            failed.push(&f.into());
        }
        let out = new_obj();
        set_kv(&out, "loaded", &to_js(&report.loaded));
        set_kv(&out, "failed", &failed.into());
        error::ok(out.into())
    }

    pub fn add_layer_res(&mut self, text: &str, name: &str, source: &str) -> JsValue {
        match self.inner.add_layer_str(text, name, source) {
            Ok(id) => error::ok(JsValue::from_f64(id as f64)),
            Err(e) => error::from_core(&e),
        }
    }

    /// `files` is an array of `{name, text}` read from one drop. The value
    /// holds one outcome per file plus the user-facing `warnings`.
    pub fn drop_files_res(&mut self, files: JsValue) -> JsValue {
        let files: Vec<DroppedFile> = match serde_wasm_bindgen::from_value(files) {
            Ok(f) => f,
            Err(e) => return error::invalid_input("files", e.to_string()),
        };
        let report = self.inner.drop_files(files);
        let warnings = report.warnings();
        for w in &warnings {
            web_sys::console::warn_1(&JsValue::from_str(w));
        }
        let out = new_obj();
        set_kv(&out, "files", &to_js(&report.files));
        set_kv(&out, "warnings", &to_js(&warnings));
        error::ok(out.into())
    }

    // Layer set

    pub fn remove_layer(&mut self, id: u32) -> bool {
        self.inner.remove_layer(id)
    }
    pub fn set_enabled(&mut self, id: u32, enabled: bool) -> bool {
        self.inner.set_enabled(id, enabled)
    }
    pub fn switch_to(&mut self, id: u32) -> bool {
        self.inner.switch_to(id)
    }
    pub fn cycle_next(&mut self) -> bool {
        self.inner.cycle_next()
    }
    pub fn set_opacity_res(&mut self, multiplier: f64) -> JsValue {
        match self.inner.set_opacity(multiplier) {
            Ok(()) => error::ok(JsValue::from_f64(multiplier)),
            Err(e) => error::from_core(&e),
        }
    }
    pub fn resolve_hotkey(&self, digit: u8) -> Option<u32> {
        self.inner.resolve_hotkey(digit)
    }
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.inner.handle_key(key)
    }
    pub fn active(&self) -> Option<u32> {
        self.rs_active()
    }
    pub fn layer_count(&self) -> u32 {
        self.inner.layer_count() as u32
    }

    // Base map

    pub fn base_layers(&self) -> JsValue {
        to_js(&self.inner.config().base_layers)
    }
    pub fn select_base_layer_res(&mut self, key: &str) -> JsValue {
        match self.inner.select_base_layer(key) {
            Ok(()) => error::ok(JsValue::from_str(key)),
            Err(e) => error::from_core(&e),
        }
    }
    pub fn set_base_opacity_res(&mut self, opacity: f64) -> JsValue {
        match self.inner.set_base_opacity(opacity) {
            Ok(()) => error::ok(JsValue::from_f64(opacity)),
            Err(e) => error::from_core(&e),
        }
    }
    pub fn toggle_background(&mut self) -> bool {
        self.inner.toggle_background()
    }

    // View + URL

    /// Snapshot for re-rendering the list, info panel and toggles.
    pub fn view(&self) -> JsValue {
        to_js(&self.inner.view())
    }
    pub fn viewport_from_hash(&self, hash: &str) -> JsValue {
        to_js(&self.inner.viewport_from_hash(hash))
    }
    pub fn fragment_for(&self, lat: f64, lng: f64, zoom: i32) -> String {
        self.inner.fragment_for(&Viewport { lat, lng, zoom })
    }
}
