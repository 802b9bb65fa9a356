//! Kvasa WASM API
//!
//! The JavaScript-facing surface for the presentation shell.
//!
//! # Module Structure
//!
//! - `helpers`: console logging, serialization, editor state access, state listener
//! - `editor`: key presses, backspace, cursor placement, raw text replacement
//! - `speech`: playback control, speech settings, the Web Speech narrator
//! - `caret`: deferred native caret placement

pub mod caret;
pub mod editor;
pub mod helpers;
pub mod speech;

pub use editor::{
    backspace, get_state, insert_key, move_cursor_to, reset_editor, set_state_listener, set_text,
};
pub use speech::{
    boundary_range, configure_speech, configure_speech_json, get_highlighted_view, get_speech_config,
    start_playback, stop_playback, WebNarrator,
};
