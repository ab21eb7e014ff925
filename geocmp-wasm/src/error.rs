use crate::interop::{new_obj, set_kv};
use geocmp_core::GeocmpError;
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn invalid_input(param: &str, message: impl Into<String>) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("invalid_input", message, Some(d.into()))
}

/// Envelope for a core error, with the offending values under `data`.
pub fn from_core(e: &GeocmpError) -> JsValue {
    let data = match e {
        GeocmpError::OutOfRange { param, min, max, got } => {
            let d = new_obj();
            set_kv(&d, "param", &JsValue::from_str(param));
            set_kv(&d, "min", &JsValue::from_f64(*min));
            set_kv(&d, "max", &JsValue::from_f64(*max));
            set_kv(&d, "got", &JsValue::from_f64(*got));
            Some(d.into())
        }
        GeocmpError::NonFinite(param) => {
            let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
            Some(d.into())
        }
        GeocmpError::UnknownBaseLayer(key) => {
            let d = new_obj(); set_kv(&d, "key", &JsValue::from_str(key));
            Some(d.into())
        }
        _ => None,
    };
    err(e.code(), e.to_string(), data)
}

/// Thrown from constructors, where an envelope cannot be returned.
pub fn to_exception(e: &GeocmpError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}
