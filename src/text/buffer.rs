//! Composition buffer
//!
//! Holds the canonical rendered text. Everything else (jamo sequence,
//! lengths) is derived from it on demand.

use serde::{Deserialize, Serialize};

use crate::hangul;
use crate::utils::chars::char_len;

/// Canonical rendered text plus a content version.
///
/// The stored text is always a fixed point of one codec round trip, so the
/// buffer never holds a form the codec could not produce itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionBuffer {
    text: String,
    /// Bumped on every change to `text`
    version: u64,
}

impl CompositionBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer from arbitrary text, normalized through the codec
    pub fn from_text(text: &str) -> Self {
        Self {
            text: hangul::normalize(text),
            version: 0,
        }
    }

    pub fn current_text(&self) -> &str {
        &self.text
    }

    /// Replace the text after normalizing it. Returns true if it changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        self.store(hangul::normalize(text))
    }

    /// Replace the text with the assembly of `jamo`. Returns true if it changed.
    pub fn set_jamo(&mut self, jamo: &[char]) -> bool {
        self.store(hangul::assemble(jamo))
    }

    /// Jamo decomposition of the current text (recomputed each call)
    pub fn jamo(&self) -> Vec<char> {
        hangul::disassemble(&self.text)
    }

    /// Length in rendered characters
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn store(&mut self, text: String) -> bool {
        if text == self.text {
            return false;
        }
        self.text = text;
        self.version += 1;
        true
    }
}
