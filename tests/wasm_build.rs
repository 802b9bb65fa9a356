//! WASM build test
//!
//! Exercises the exported API in a browser: edits, snapshots, speech config.

use std::cell::Cell;
use std::rc::Rc;

use kvasa_wasm::api::*;
use kvasa_wasm::EngineSnapshot;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn snapshot(value: JsValue) -> EngineSnapshot {
    serde_wasm_bindgen::from_value(value).unwrap()
}

#[wasm_bindgen_test]
fn test_insert_and_backspace() {
    reset_editor().unwrap();

    insert_key('ㄱ', None).unwrap();
    let state = snapshot(insert_key('ㅏ', None).unwrap());
    assert_eq!(state.text, "가");
    assert_eq!(state.cursor, 1);

    let state = snapshot(backspace(None).unwrap());
    assert_eq!(state.text, "ㄱ");
    assert_eq!(state.cursor, 1);
}

#[wasm_bindgen_test]
fn test_set_text_and_move_cursor() {
    reset_editor().unwrap();

    let state = snapshot(set_text("안녕", None, None).unwrap());
    assert_eq!(state.cursor, 2);

    let state = snapshot(move_cursor_to(99.0).unwrap());
    assert_eq!(state.cursor, 2);

    let state = snapshot(move_cursor_to(-1.0).unwrap());
    assert_eq!(state.cursor, 0);

    let state = snapshot(get_state().unwrap());
    assert_eq!(state.text, "안녕");
}

#[wasm_bindgen_test]
fn test_speech_config_validation() {
    assert!(configure_speech_json(r#"{"rate": 1.5}"#).is_ok());
    assert!(configure_speech_json(r#"{"rate": 50}"#).is_err());
    assert!(configure_speech_json("not json").is_err());
}

#[wasm_bindgen_test]
fn test_stop_while_idle() {
    reset_editor().unwrap();

    let state = snapshot(stop_playback().unwrap());
    assert_eq!(state.highlight, None);
}

fn boundary_event(fields: &[(&str, f64)]) -> JsValue {
    let event = js_sys::Object::new();
    for (name, value) in fields {
        js_sys::Reflect::set(&event, &JsValue::from_str(name), &JsValue::from_f64(*value)).unwrap();
    }
    event.into()
}

#[wasm_bindgen_test]
fn test_boundary_event_validation() {
    let event = boundary_event(&[("charIndex", 0.0), ("charLength", 1.0)]);
    assert_eq!(boundary_range(&event, "안녕"), Some((0, 1)));

    // Missing fields never turn into a highlight at 0
    let event = boundary_event(&[("charIndex", 1.0)]);
    assert_eq!(boundary_range(&event, "안녕"), None);
    let event = boundary_event(&[("charLength", 1.0)]);
    assert_eq!(boundary_range(&event, "안녕"), None);

    let event = boundary_event(&[("charIndex", 1e300), ("charLength", 1.0)]);
    assert_eq!(boundary_range(&event, "안녕"), None);
    let event = boundary_event(&[("charIndex", -1.0), ("charLength", 1.0)]);
    assert_eq!(boundary_range(&event, "안녕"), None);
}

#[wasm_bindgen_test]
async fn test_caret_callback_deferred_until_after_insert() {
    reset_editor().unwrap();
    set_text("가나", Some(1.0), None).unwrap();

    let mut resolve = None;
    let done = js_sys::Promise::new(&mut |res, _rej| resolve = Some(res));
    let resolve = resolve.unwrap();

    let received = Rc::new(Cell::new(None));
    let sink = received.clone();
    let on_caret = Closure::<dyn FnMut(JsValue)>::new(move |offset: JsValue| {
        sink.set(offset.as_f64());
        resolve.call1(&JsValue::NULL, &offset).unwrap();
    });
    let callback: js_sys::Function = on_caret.as_ref().unchecked_ref::<js_sys::Function>().clone();

    let state = snapshot(insert_key('ㄱ', Some(callback)).unwrap());
    assert_eq!(state.text, "각나");
    assert_eq!(state.cursor, 2);
    assert_eq!(received.get(), None);

    let offset = JsFuture::from(done).await.unwrap();
    assert_eq!(offset.as_f64(), Some(2.0));
    assert_eq!(received.get(), Some(2.0));
    drop(on_caret);
}
