//! Editor models
//!
//! State shared between the editing core, the speech synchronizer and the
//! JavaScript API.

pub mod editor_state;

pub use editor_state::{EditorState, EditorUpdate, EngineSnapshot};
