use geocmp_wasm::Viewer;
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(v: &JsValue, key: &str) -> JsValue {
    Reflect::get(v, &JsValue::from_str(key)).unwrap()
}

fn is_ok(v: &JsValue) -> bool {
    get(v, "ok").as_bool().unwrap_or(false)
}

fn is_err_code(v: &JsValue, code: &str) -> bool {
    if is_ok(v) {
        return false;
    }
    get(&get(v, "error"), "code").as_string().map_or(false, |s| s == code)
}

fn surface(build_body: &str) -> JsValue {
    let obj = Object::new();
    let noop = Function::new_no_args("");
    for name in ["show", "hide", "destroy", "restyle", "fitBounds", "setBaseLayer", "setBaseOpacity", "setBackground"] {
        Reflect::set(&obj, &JsValue::from_str(name), &noop).unwrap();
    }
    let build = Function::new_with_args("id, data, features", build_body);
    Reflect::set(&obj, &JsValue::from_str("buildOverlay"), &build).unwrap();
    obj.into()
}

fn viewer() -> Viewer {
    Viewer::new(surface("return { id: id, n: features.length };"), JsValue::UNDEFINED).unwrap()
}

const POINT: &str = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"name":"x"},"geometry":{"type":"Point","coordinates":[30.5,50.25]}}]}"#;

#[wasm_bindgen_test]
fn payload_then_keys() {
    let mut v = viewer();
    let payload = format!(
        r#"[{{"name":"A","source":"a.geojson","features":1,"data":{}}},{{"name":"B","source":"b.geojson","features":0,"data":{{"type":"FeatureCollection","features":[]}}}}]"#,
        POINT
    );
    let r = v.load_json(&payload);
    assert!(is_ok(&r));
    assert_eq!(v.active(), Some(1));
    assert!(v.handle_key("2"));
    assert_eq!(v.active(), Some(2));
    assert!(v.handle_key("t"));
    assert_eq!(v.active(), Some(1));

    let view = v.view();
    let entries: Array = get(&view, "entries").into();
    assert_eq!(entries.length(), 2);
    assert_eq!(get(&get(&view, "info"), "name").as_string().as_deref(), Some("A"));
}

#[wasm_bindgen_test]
fn typed_errors() {
    let mut v = viewer();
    assert!(is_err_code(&v.add_layer_res("{oops", "bad", "mem"), "parse"));
    assert!(is_err_code(&v.add_layer_res(r#"{"type":"Feature"}"#, "bad", "mem"), "not_feature_collection"));
    assert!(is_err_code(&v.set_opacity_res(1.5), "out_of_range"));
    assert!(is_err_code(&v.set_opacity_res(f64::NAN), "non_finite"));
    assert!(is_err_code(&v.select_base_layer_res("mars"), "unknown_base_layer"));
    assert!(is_err_code(&v.load_json("{}"), "invalid_input"));
    assert_eq!(v.layer_count(), 0);

    let r = v.add_layer_res(POINT, "p", "mem");
    assert!(is_ok(&r));
    assert_eq!(get(&r, "value").as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn throwing_renderer_is_an_overlay_error() {
    let mut v = Viewer::new(surface("throw new Error('no canvas');"), JsValue::UNDEFINED).unwrap();
    let r = v.add_layer_res(POINT, "p", "mem");
    assert!(is_err_code(&r, "overlay"));
    assert_eq!(v.layer_count(), 0);
}

#[wasm_bindgen_test]
fn drop_batch_reports_each_file() {
    let mut v = viewer();
    let files = Array::new();
    for (name, text) in [("route.txt", "x"), ("extra.geojson", POINT)] {
        let f = Object::new();
        Reflect::set(&f, &JsValue::from_str("name"), &JsValue::from_str(name)).unwrap();
        Reflect::set(&f, &JsValue::from_str("text"), &JsValue::from_str(text)).unwrap();
        files.push(&f);
    }
    let r = v.drop_files_res(files.into());
    assert!(is_ok(&r));
    let outcomes: Array = get(&get(&r, "value"), "files").into();
    assert_eq!(get(&outcomes.get(0), "outcome").as_string().as_deref(), Some("rejected"));
    assert_eq!(get(&outcomes.get(1), "outcome").as_string().as_deref(), Some("added"));
    let warnings: Array = get(&get(&r, "value"), "warnings").into();
    assert_eq!(warnings.length(), 1);
    assert!(warnings.get(0).as_string().unwrap().starts_with("route.txt: "));
    assert_eq!(v.active(), Some(1));
}

#[wasm_bindgen_test]
fn viewport_hash() {
    let v = viewer();
    let vp = v.viewport_from_hash("#lat=abc&lng=10&zoom=4");
    assert_eq!(get(&vp, "lat").as_f64(), Some(55.75));
    assert_eq!(get(&vp, "lng").as_f64(), Some(10.0));
    assert_eq!(v.fragment_for(1.0, 2.0, 3), "#lat=1.00000&lng=2.00000&zoom=3");
}

#[wasm_bindgen_test]
fn bad_config_throws() {
    let cfg = Object::new();
    Reflect::set(&cfg, &JsValue::from_str("defaultBaseLayer"), &JsValue::from_str("mars")).unwrap();
    assert!(Viewer::new(surface("return {};"), cfg.into()).is_err());
}
