//! Cursor-accurate edit controller
//!
//! Translates a caret expressed in rendered characters into a jamo index,
//! edits the jamo sequence and recomputes the caret after reassembly.
//! Rendered lengths and jamo counts diverge (one block folds two to five
//! jamo), so every edit goes through the jamo sequence.

use serde::{Deserialize, Serialize};

use super::buffer::CompositionBuffer;
use super::cursor::RenderedCursor;
use crate::hangul;
use crate::utils::chars::{char_len, split_at_char};

/// How the shell should place its native caret after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "offset", rename_all = "snake_case")]
pub enum CaretPlacement {
    /// Native caret already matches; nothing to do
    Unchanged,
    /// Position the native caret here once the current render has committed
    Deferred(usize),
}

/// Result of an edit operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditResult {
    pub text: String,
    pub cursor: usize,
    pub caret: CaretPlacement,
}

/// Owns the composition buffer and the rendered cursor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditController {
    buffer: CompositionBuffer,
    cursor: RenderedCursor,
}

impl EditController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing text with the cursor at its end
    pub fn with_text(text: &str) -> Self {
        let buffer = CompositionBuffer::from_text(text);
        let cursor = RenderedCursor::clamped(usize::MAX, buffer.char_len());
        Self { buffer, cursor }
    }

    pub fn buffer(&self) -> &CompositionBuffer {
        &self.buffer
    }

    pub fn text(&self) -> &str {
        self.buffer.current_text()
    }

    pub fn cursor(&self) -> usize {
        self.cursor.offset()
    }

    /// Insert a key at the cursor.
    ///
    /// The key is folded into neighbouring blocks by the codec and the
    /// caret advances one rendered character, clamped to the new text.
    /// Control characters are ignored.
    pub fn insert(&mut self, key: char) -> EditResult {
        if key.is_control() {
            log::debug!("insert: ignoring control character {:?}", key);
            return self.result(CaretPlacement::Unchanged);
        }

        let cursor = self.cursor.offset();
        let (before, after) = split_at_char(self.buffer.current_text(), cursor);
        let mut jamo = hangul::disassemble(before);
        jamo.extend(hangul::disassemble_char(key));
        jamo.extend(hangul::disassemble(after));

        self.buffer.set_jamo(&jamo);
        self.cursor.move_to(cursor + 1, self.buffer.char_len());

        log::debug!(
            "insert {:?}: text={:?} cursor={}",
            key,
            self.buffer.current_text(),
            self.cursor.offset()
        );
        self.result(CaretPlacement::Deferred(self.cursor.offset()))
    }

    /// Delete the last jamo of the rendered character before the cursor.
    ///
    /// A full block loses its trail first, then its vowel, then its lead,
    /// one jamo per call. No-op at offset 0.
    pub fn backspace(&mut self) -> EditResult {
        let cursor = self.cursor.offset();
        if cursor == 0 {
            return self.result(CaretPlacement::Unchanged);
        }

        // Each rendered character disassembles on its own, so the jamo
        // boundary before the cursor is the sum of per-character counts.
        let boundary: usize = self
            .buffer
            .current_text()
            .chars()
            .take(cursor)
            .map(hangul::jamo_count)
            .sum();
        if boundary == 0 {
            return self.result(CaretPlacement::Unchanged);
        }

        let mut jamo = self.buffer.jamo();
        let removed = jamo.remove(boundary - 1);
        let cursor = char_len(&hangul::assemble(&jamo[..boundary - 1]));

        self.buffer.set_jamo(&jamo);
        self.cursor.move_to(cursor, self.buffer.char_len());

        log::debug!(
            "backspace removed {:?}: text={:?} cursor={}",
            removed,
            self.buffer.current_text(),
            self.cursor.offset()
        );
        self.result(CaretPlacement::Deferred(self.cursor.offset()))
    }

    /// Move the cursor, clamping out-of-range offsets
    pub fn move_cursor_to(&mut self, offset: usize) -> EditResult {
        self.cursor.move_to(offset, self.buffer.char_len());
        self.result(CaretPlacement::Unchanged)
    }

    /// Replace the text from an out-of-band edit (paste, native input).
    ///
    /// The cursor goes to `cursor` (clamped) or to the end when absent.
    pub fn set_text(&mut self, text: &str, cursor: Option<usize>) -> EditResult {
        self.buffer.set_text(text);
        let len = self.buffer.char_len();
        self.cursor.move_to(cursor.unwrap_or(len), len);
        self.result(CaretPlacement::Deferred(self.cursor.offset()))
    }

    fn result(&self, caret: CaretPlacement) -> EditResult {
        EditResult {
            text: self.buffer.current_text().to_string(),
            cursor: self.cursor.offset(),
            caret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> EditController {
        let mut controller = EditController::new();
        for key in keys.chars() {
            controller.insert(key);
        }
        controller
    }

    #[test]
    fn test_insert_composes_block() {
        let mut controller = EditController::new();
        let result = controller.insert('ㄱ');
        assert_eq!((result.text.as_str(), result.cursor), ("ㄱ", 1));

        let result = controller.insert('ㅏ');
        assert_eq!((result.text.as_str(), result.cursor), ("가", 1));
        assert_eq!(result.caret, CaretPlacement::Deferred(1));
    }

    #[test]
    fn test_insert_digit_does_not_combine() {
        let controller = typed("1ㄴ");
        assert_eq!(controller.text(), "1ㄴ");
        assert_eq!(controller.cursor(), 2);
    }

    #[test]
    fn test_insert_trail_then_vowel_moves_consonant() {
        let controller = typed("ㅇㅏㄴㄴㅕㅇ");
        assert_eq!(controller.text(), "안녕");
        assert_eq!(controller.cursor(), 2);

        let controller = typed("ㄱㅏㄴㅏ");
        assert_eq!(controller.text(), "가나");
        assert_eq!(controller.cursor(), 2);
    }

    #[test]
    fn test_insert_mid_text_advances_caret() {
        let mut controller = typed("가나");
        controller.move_cursor_to(1);

        let result = controller.insert('ㄱ');
        assert_eq!(result.text, "각나");
        assert_eq!(result.cursor, 2);
        assert_eq!(result.caret, CaretPlacement::Deferred(2));

        controller.move_cursor_to(1);
        let result = controller.insert('.');
        assert_eq!(result.text, "각.나");
        assert_eq!(result.cursor, 2);
    }

    #[test]
    fn test_insert_caret_clamped_to_text() {
        // Folding at the end never moves the caret past the text
        let mut controller = typed("ㅗ");
        let result = controller.insert('ㅏ');
        assert_eq!(result.text, "ㅘ");
        assert_eq!(result.cursor, 1);
    }

    #[test]
    fn test_insert_vowel_between_consonants() {
        let mut controller = typed("ㄱㄴ");
        controller.move_cursor_to(1);
        let result = controller.insert('ㅏ');
        assert_eq!(result.text, "간");
        assert_eq!(result.cursor, 1);
    }

    #[test]
    fn test_insert_ignores_control_characters() {
        let mut controller = typed("가");
        let result = controller.insert('\u{8}');
        assert_eq!(result.text, "가");
        assert_eq!(result.caret, CaretPlacement::Unchanged);
    }

    #[test]
    fn test_backspace_strips_one_jamo_at_a_time() {
        let mut controller = typed("ㄱㅏ");

        let result = controller.backspace();
        assert_eq!((result.text.as_str(), result.cursor), ("ㄱ", 1));

        let result = controller.backspace();
        assert_eq!((result.text.as_str(), result.cursor), ("", 0));
    }

    #[test]
    fn test_backspace_complex_trail() {
        let mut controller = typed("ㄱㅏㅂㅅ");
        assert_eq!(controller.text(), "값");

        assert_eq!(controller.backspace().text, "갑");
        assert_eq!(controller.backspace().text, "가");
        assert_eq!(controller.backspace().text, "ㄱ");
    }

    #[test]
    fn test_backspace_mid_text() {
        let mut controller = typed("간나");
        controller.move_cursor_to(1);

        let result = controller.backspace();
        assert_eq!(result.text, "가나");
        assert_eq!(result.cursor, 1);

        let result = controller.backspace();
        assert_eq!(result.text, "ㄱ나");
        assert_eq!(result.cursor, 1);
    }

    #[test]
    fn test_backspace_removes_exactly_one_jamo() {
        let mut controller = typed("ㅎㅗㅏㄹㅎ1ㅇㅡㅣ");
        while controller.cursor() > 0 {
            let jamo_before = controller.buffer().jamo().len();
            let len_before = controller.buffer().char_len();
            controller.backspace();
            assert_eq!(controller.buffer().jamo().len(), jamo_before - 1);
            assert!(controller.buffer().char_len() <= len_before);
        }
        assert_eq!(controller.text(), "");
    }

    #[test]
    fn test_backspace_at_zero_is_noop() {
        let mut controller = typed("가");
        controller.move_cursor_to(0);
        let before = controller.clone();

        let result = controller.backspace();
        assert_eq!(result.caret, CaretPlacement::Unchanged);
        assert_eq!(controller.text(), before.text());
        assert_eq!(controller.cursor(), before.cursor());
        assert_eq!(controller.buffer().version(), before.buffer().version());
    }

    #[test]
    fn test_move_cursor_clamps() {
        let mut controller = typed("가나");
        assert_eq!(controller.move_cursor_to(10).cursor, 2);
        assert_eq!(controller.move_cursor_to(0).cursor, 0);
    }

    #[test]
    fn test_set_text_normalizes_and_places_cursor() {
        let mut controller = EditController::new();
        let result = controller.set_text("ㅎㅏㄴㄱㅡㄹ", None);
        assert_eq!(result.text, "한글");
        assert_eq!(result.cursor, 2);

        let result = controller.set_text("안녕", Some(9));
        assert_eq!(result.cursor, 2);
        let result = controller.set_text("안녕", Some(1));
        assert_eq!(result.cursor, 1);
    }

    #[test]
    fn test_typed_text_round_trips() {
        let controller = typed("ㄷㅏㄹㄱㅇㅣ ㅇㅗㅏㅆㄷㅏ!");
        let text = controller.text();
        assert_eq!(hangul::normalize(text), text);
    }

    #[test]
    fn test_with_text_puts_cursor_at_end() {
        let controller = EditController::with_text("안녕");
        assert_eq!(controller.cursor(), 2);
    }
}
