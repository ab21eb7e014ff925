use js_sys::{Array, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn array(items: &[JsValue]) -> Array {
    let arr = Array::new_with_length(items.len() as u32);
    for (i, v) in items.iter().enumerate() { arr.set(i as u32, v.clone()); }
    arr
}

// Plain objects instead of JS Maps, so Leaflet can consume GeoJSON directly.
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> JsValue {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).unwrap_or(JsValue::NULL)
}

/// Best-effort message of a thrown JS value.
pub fn error_text(e: &JsValue) -> String {
    if let Some(s) = e.as_string() { return s; }
    Reflect::get(e, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", e))
}
