//! Shared helpers for WASM API operations
//!
//! Console logging, serialization, the WASM-owned editor state and the
//! JavaScript state listener.

use std::cell::RefCell;
use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::KvasaError;
use crate::models::EditorState;

// WASM-owned editor state (canonical source of truth)
lazy_static! {
    static ref EDITOR: Mutex<EditorState> = Mutex::new(EditorState::new());
}

thread_local! {
    // JS functions are not Send, so the listener cannot live behind the Mutex
    static STATE_LISTENER: RefCell<Option<js_sys::Function>> = RefCell::new(None);
}

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

pub fn log_info(msg: &str) {
    info(&format!("[WASM] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let err = KvasaError::Deserialization(format!("{}: {}", error_context, e));
        log_error(&err.to_string());
        err.into()
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let err = KvasaError::Serialization(format!("{}: {}", error_context, e));
        log_error(&err.to_string());
        err.into()
    })
}

// ============================================================================
// Editor State Access
// ============================================================================

/// Lock the editor state.
///
/// Never hold the guard across narration commands or JS callbacks: both can
/// re-enter the API on the same thread.
pub fn lock_editor() -> Result<MutexGuard<'static, EditorState>, JsValue> {
    EDITOR.lock().map_err(|_| {
        log_error("Editor state lock poisoned");
        KvasaError::StateLock.into()
    })
}

// ============================================================================
// State Listener
// ============================================================================

pub fn set_listener(listener: Option<js_sys::Function>) {
    STATE_LISTENER.with(|slot| *slot.borrow_mut() = listener);
}

/// Hand a serialized snapshot to the registered listener, if any
pub fn notify_listener(snapshot: &JsValue) {
    // Clone out first so the listener may replace itself
    let listener = STATE_LISTENER.with(|slot| slot.borrow().clone());
    if let Some(listener) = listener {
        if let Err(e) = listener.call1(&JsValue::NULL, snapshot) {
            log_warn(&format!("state listener threw: {:?}", e));
        }
    }
}

/// Serialize the current snapshot and notify the listener
pub fn publish_snapshot() -> Result<JsValue, JsValue> {
    let snapshot = lock_editor()?.snapshot();
    let value = serialize(&snapshot, "Failed to serialize editor snapshot")?;
    notify_listener(&value);
    Ok(value)
}
