//! Cursor and highlight offsets
//!
//! Offsets are counted in rendered characters: one syllable block is one
//! unit no matter how many jamo it folds together.

use serde::{Deserialize, Serialize};

/// Caret offset into the rendered text, `0 <= offset <= len`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderedCursor(usize);

impl RenderedCursor {
    /// Create a cursor clamped into `0..=len`
    pub fn clamped(offset: usize, len: usize) -> Self {
        Self(offset.min(len))
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn offset(&self) -> usize {
        self.0
    }

    /// Move to `offset`, clamped into `0..=len`
    pub fn move_to(&mut self, offset: usize, len: usize) {
        self.0 = offset.min(len);
    }
}

/// Half-open range `[start, end)` of rendered characters being spoken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
}

impl HighlightRange {
    /// Empty range at the start of the text
    pub fn empty() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Build a range from a boundary event, rejecting anything that does
    /// not fit inside a text of `text_len` characters.
    pub fn checked(index: usize, length: usize, text_len: usize) -> Option<Self> {
        let end = index.checked_add(length)?;
        (end <= text_len).then_some(Self { start: index, end })
    }
}
