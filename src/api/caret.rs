//! Deferred caret placement
//!
//! A textarea resets its caret when its value is replaced during render.
//! The computed caret is therefore handed back on a later task, after the
//! shell has committed the new text.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::KvasaError;
use crate::text::CaretPlacement;
use crate::wasm_warn;

/// Call `callback(offset)` on the next macrotask when the edit deferred a caret
pub fn schedule_caret(callback: &js_sys::Function, placement: CaretPlacement) -> Result<(), JsValue> {
    let CaretPlacement::Deferred(offset) = placement else {
        return Ok(());
    };

    let window = web_sys::window().ok_or(KvasaError::NoWindow)?;

    let callback = callback.clone();
    let task = Closure::once_into_js(move || {
        if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from(offset as u32)) {
            wasm_warn!("caret callback threw: {:?}", e);
        }
    });

    window.set_timeout_with_callback_and_timeout_and_arguments_0(task.unchecked_ref(), 0)?;
    Ok(())
}
