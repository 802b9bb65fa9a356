//! Rendered-character offset helpers
//!
//! All engine offsets count Unicode scalar values (one syllable block is one
//! unit). Browsers report speech progress in UTF-16 code units, so the
//! conversions live here too.

/// Length in rendered characters
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the rendered character at `index` (clamped to the end)
pub fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Split at a rendered-character offset
pub fn split_at_char(text: &str, index: usize) -> (&str, &str) {
    text.split_at(byte_offset(text, index))
}

/// Slice `[start, end)` in rendered characters, clamped to the text
pub fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end.max(start));
    &text[start_byte..end_byte]
}

/// Convert a UTF-16 code unit offset into a rendered-character offset.
///
/// An offset inside a surrogate pair resolves to the character after it.
pub fn utf16_to_char_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, ch) in text.chars().enumerate() {
        if units >= utf16_offset {
            return index;
        }
        units += ch.len_utf16();
    }
    char_len(text)
}

/// Length of the word starting at `index`, up to the next whitespace
pub fn word_len_at(text: &str, index: usize) -> usize {
    text.chars()
        .skip(index)
        .take_while(|c| !c.is_whitespace())
        .count()
}

/// Map a browser boundary event `(charIndex, charLength)` in UTF-16 units
/// onto `(char_index, char_length)` in rendered characters.
///
/// Some engines report a zero length; the range then covers the word.
/// Returns `None` when the range does not fit inside `text`.
pub fn boundary_to_char_range(
    text: &str,
    utf16_index: usize,
    utf16_length: usize,
) -> Option<(usize, usize)> {
    let utf16_end = utf16_index.checked_add(utf16_length)?;
    if utf16_end > text.encode_utf16().count() {
        return None;
    }

    let start = utf16_to_char_offset(text, utf16_index);
    if utf16_length == 0 {
        return Some((start, word_len_at(text, start)));
    }
    let end = utf16_to_char_offset(text, utf16_end);
    Some((start, end.saturating_sub(start)))
}
