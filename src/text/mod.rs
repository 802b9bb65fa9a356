//! Text editing core
//!
//! Pure text editing over Hangul jamo with no knowledge of the browser.
//!
//! ## Modules
//!
//! - `buffer`: canonical rendered text (source of truth)
//! - `cursor`: rendered-character cursor and highlight ranges
//! - `controller`: cursor-accurate insert/backspace at jamo granularity

pub mod buffer;
pub mod controller;
pub mod cursor;

// Re-exports for convenience
pub use buffer::CompositionBuffer;
pub use controller::{CaretPlacement, EditController, EditResult};
pub use cursor::{HighlightRange, RenderedCursor};
