//! Editing API
//!
//! Key presses, cursor placement and raw text replacement from the
//! presentation shell. Every call returns the new snapshot
//! `{ text, cursor, highlight, playback, last_error }` and also hands it to
//! the state listener.

use wasm_bindgen::prelude::*;

use crate::api::caret::schedule_caret;
use crate::api::helpers::{lock_editor, publish_snapshot, serialize, set_listener};
use crate::api::speech::dispatch;
use crate::models::{EditorState, EditorUpdate};
use crate::{wasm_info, wasm_log};

/// Insert a key (jamo, digit or punctuation) at the cursor.
///
/// `on_caret`, if given, is called with the new caret offset after the
/// current render has committed.
#[wasm_bindgen(js_name = insertKey)]
pub fn insert_key(key: char, on_caret: Option<js_sys::Function>) -> Result<JsValue, JsValue> {
    wasm_info!("insertKey called: key='{}'", key);

    let update = lock_editor()?.insert(key);
    finish_edit(update, on_caret)
}

/// Delete the last jamo before the cursor
#[wasm_bindgen]
pub fn backspace(on_caret: Option<js_sys::Function>) -> Result<JsValue, JsValue> {
    wasm_info!("backspace called");

    let update = lock_editor()?.backspace();
    finish_edit(update, on_caret)
}

/// Place the cursor after a click or native caret move (clamped)
#[wasm_bindgen(js_name = moveCursorTo)]
pub fn move_cursor_to(offset: f64) -> Result<JsValue, JsValue> {
    let offset = offset_from_js(offset);
    let result = lock_editor()?.move_cursor_to(offset);
    wasm_log!("moveCursorTo {} -> {}", offset, result.cursor);
    publish_snapshot()
}

/// Replace the text after an out-of-band edit such as a paste.
///
/// `cursor` is the native caret offset; absent means the end of the text.
#[wasm_bindgen(js_name = setText)]
pub fn set_text(
    text: &str,
    cursor: Option<f64>,
    on_caret: Option<js_sys::Function>,
) -> Result<JsValue, JsValue> {
    wasm_info!("setText called: {:?}, cursor={:?}", text, cursor);

    let update = lock_editor()?.set_text(text, cursor.map(offset_from_js));
    finish_edit(update, on_caret)
}

/// Current `{ text, cursor, highlight, playback, last_error }`
#[wasm_bindgen(js_name = getState)]
pub fn get_state() -> Result<JsValue, JsValue> {
    let snapshot = lock_editor()?.snapshot();
    serialize(&snapshot, "Failed to serialize editor snapshot")
}

/// Discard text, cursor and any playback, keeping the speech settings
#[wasm_bindgen(js_name = resetEditor)]
pub fn reset_editor() -> Result<JsValue, JsValue> {
    wasm_info!("resetEditor called");

    let commands = {
        let mut state = lock_editor()?;
        let commands = state.stop_playback();
        let config = state.config().clone();
        *state = EditorState::new();
        state.set_config(config);
        commands
    };
    dispatch(commands);
    publish_snapshot()
}

/// Register a function called with every new snapshot (pass null to clear)
#[wasm_bindgen(js_name = setStateListener)]
pub fn set_state_listener(listener: Option<js_sys::Function>) {
    set_listener(listener);
}

/// Clamp a JS caret offset below at 0; NaN counts as 0, fractions truncate.
/// The core clamps the upper end to the text.
fn offset_from_js(offset: f64) -> usize {
    if offset.is_nan() || offset <= 0.0 {
        0
    } else if offset >= usize::MAX as f64 {
        usize::MAX
    } else {
        offset as usize
    }
}

fn finish_edit(update: EditorUpdate, on_caret: Option<js_sys::Function>) -> Result<JsValue, JsValue> {
    // Editing while playing stops the session; run the cancel unlocked
    dispatch(update.narration);

    if let Some(callback) = on_caret {
        schedule_caret(&callback, update.edit.caret)?;
    }
    publish_snapshot()
}
