//! Tests for the JS-facing binding. Run with `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use atlas_layout::AtlasLayoutWasm;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::{JsError, JsValue};
use wasm_bindgen_test::*;

fn config(entries: &[(&str, JsValue)]) -> JsValue {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value).unwrap();
    }
    object.into()
}

fn ok<T>(result: Result<T, JsError>) -> T {
    result.map_err(JsValue::from).unwrap()
}

fn two_node_layout() -> AtlasLayoutWasm {
    let mut layout = ok(AtlasLayoutWasm::new(config(&[("kG", JsValue::from_f64(0.0))])));
    ok(layout.add_node_at(0.0, 0.0, &[2]));
    ok(layout.add_node_at(3.0, 0.0, &[1]));
    layout
}

#[wasm_bindgen_test]
fn undefined_config_uses_defaults() {
    let mut layout = ok(AtlasLayoutWasm::new(JsValue::UNDEFINED));
    assert_eq!(ok(layout.add_node(&[])), 1);
    assert_eq!(ok(layout.add_node_with_mass(2.0, &[1])), 2);
    assert_eq!(layout.node_count(), 2);
    assert_eq!(layout.tick_count(), 0);
    assert!(!layout.is_converged());
}

#[wasm_bindgen_test]
fn invalid_inputs_throw() {
    let bad = config(&[("tick", JsValue::from_f64(0.0))]);
    assert!(AtlasLayoutWasm::new(bad).is_err());

    let mut layout = ok(AtlasLayoutWasm::new(JsValue::NULL));
    assert!(layout.add_node_with_mass(0.0, &[]).is_err());
    assert!(layout.add_node(&[0]).is_err());

    ok(layout.add_node(&[4]));
    assert!(layout.step().is_err());
}

#[wasm_bindgen_test]
fn two_node_layout_converges_in_one_step() {
    let mut layout = two_node_layout();

    let energy = ok(layout.step());
    assert!((energy - 0.0009).abs() < 1e-9);
    assert_eq!(layout.energy(), energy);
    assert_eq!(layout.tick_count(), 1);
    assert!(layout.is_converged());

    let flat = layout.positions_array().to_vec();
    assert_eq!(flat.len(), 4);
    assert!((flat[0] + 0.003).abs() < 1e-9);
    assert!((flat[2] - 3.003).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn positions_are_plain_objects() {
    let layout = two_node_layout();
    let positions: Array = ok(layout.positions()).into();
    assert_eq!(positions.length(), 2);

    let second = positions.get(1);
    let id = Reflect::get(&second, &JsValue::from_str("id")).unwrap();
    let x = Reflect::get(&second, &JsValue::from_str("x")).unwrap();
    assert_eq!(id.as_f64(), Some(2.0));
    assert_eq!(x.as_f64(), Some(3.0));
}

#[wasm_bindgen_test]
fn tick_cap_throws() {
    let strong = config(&[
        ("kG", JsValue::from_f64(0.0)),
        ("kR", JsValue::from_f64(100.0)),
    ]);
    let mut layout = ok(AtlasLayoutWasm::new(strong));
    ok(layout.add_node_at(0.0, 0.0, &[]));
    ok(layout.add_node_at(1.0, 0.0, &[]));

    assert!(layout.run_until_converged(Some(3)).is_err());
    assert_eq!(layout.tick_count(), 3);
}
