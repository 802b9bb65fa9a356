//! Error types
//!
//! The editing core is total and never fails. Errors only appear at the
//! browser boundary, plus `PlaybackError` for recoverable narration failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures at the JavaScript boundary
#[derive(Debug, Clone, Error)]
pub enum KvasaError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Speech configuration value outside the Web Speech API range
    #[error("Invalid speech config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f32 },

    #[error("No global window object")]
    NoWindow,

    /// No `speechSynthesis` in this environment, or it refused a request
    #[error("Speech synthesis unavailable: {0}")]
    SpeechUnavailable(String),

    #[error("Editor state lock poisoned")]
    StateLock,
}

impl From<KvasaError> for JsValue {
    fn from(err: KvasaError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// A narration service failure. Ends the session, never the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("narration failed ({code}): {message}")]
pub struct PlaybackError {
    /// Service error code (`synthesis-failed`, `interrupted`, ...)
    pub code: String,
    pub message: String,
}

impl PlaybackError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Errors our own cancel provokes; not worth showing to the user
    pub fn is_cancellation(&self) -> bool {
        matches!(self.code.as_str(), "canceled" | "interrupted")
    }
}
