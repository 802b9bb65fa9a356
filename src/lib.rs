//! Kvasa WASM Module
//!
//! Hangul composition engine for a tap-to-type Korean keyboard: jamo-level
//! editing with an accurate caret, and speech playback with a highlight that
//! follows the narration.

pub mod api;
pub mod error;
pub mod hangul;
pub mod models;
pub mod speech;
pub mod text;
pub mod utils;

// Re-export commonly used types
pub use error::{KvasaError, PlaybackError};
pub use models::{EditorState, EditorUpdate, EngineSnapshot};
pub use speech::{HighlightedView, NarrationCommand, NarrationEvent, PlaybackStatus, SpeechConfig};
pub use text::{CaretPlacement, EditController, EditResult, HighlightRange};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        api::helpers::log_warn("logger already initialized");
    }

    log::info!("Kvasa WASM module initialized");
}
