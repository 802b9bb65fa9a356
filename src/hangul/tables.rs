//! Hangul composition tables
//!
//! Syllable arithmetic constants and the compatibility-jamo tables used to
//! move between precomposed syllables (U+AC00..U+D7A3) and the jamo a
//! virtual keyboard emits (U+3131..U+3163).

/// First precomposed syllable (가)
pub const SYLLABLE_BASE: u32 = 0xAC00;
/// Number of leading consonants
pub const LEAD_COUNT: u32 = 19;
/// Number of vowels
pub const VOWEL_COUNT: u32 = 21;
/// Number of trailing consonants, including "no trail"
pub const TRAIL_COUNT: u32 = 28;
/// Number of precomposed syllables
pub const SYLLABLE_COUNT: u32 = LEAD_COUNT * VOWEL_COUNT * TRAIL_COUNT;

/// Leading consonants in syllable-index order
#[rustfmt::skip]
pub const LEADS: [char; LEAD_COUNT as usize] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ',
    'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Vowels in syllable-index order (contiguous U+314F..U+3163)
#[rustfmt::skip]
pub const VOWELS: [char; VOWEL_COUNT as usize] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ',
    'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ',
    'ㅣ',
];

/// Trailing consonants; entry `i` is trail index `i + 1` (index 0 means no trail)
#[rustfmt::skip]
pub const TRAILS: [char; (TRAIL_COUNT - 1) as usize] = [
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ',
    'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ', 'ㅁ', 'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ',
    'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Vowel pairs that fold into a single complex vowel: (first, second, complex)
pub const COMPLEX_VOWELS: [(char, char, char); 7] = [
    ('ㅗ', 'ㅏ', 'ㅘ'),
    ('ㅗ', 'ㅐ', 'ㅙ'),
    ('ㅗ', 'ㅣ', 'ㅚ'),
    ('ㅜ', 'ㅓ', 'ㅝ'),
    ('ㅜ', 'ㅔ', 'ㅞ'),
    ('ㅜ', 'ㅣ', 'ㅟ'),
    ('ㅡ', 'ㅣ', 'ㅢ'),
];

/// Consonant pairs that fold into a single complex trail: (first, second, complex)
pub const COMPLEX_TRAILS: [(char, char, char); 11] = [
    ('ㄱ', 'ㅅ', 'ㄳ'),
    ('ㄴ', 'ㅈ', 'ㄵ'),
    ('ㄴ', 'ㅎ', 'ㄶ'),
    ('ㄹ', 'ㄱ', 'ㄺ'),
    ('ㄹ', 'ㅁ', 'ㄻ'),
    ('ㄹ', 'ㅂ', 'ㄼ'),
    ('ㄹ', 'ㅅ', 'ㄽ'),
    ('ㄹ', 'ㅌ', 'ㄾ'),
    ('ㄹ', 'ㅍ', 'ㄿ'),
    ('ㄹ', 'ㅎ', 'ㅀ'),
    ('ㅂ', 'ㅅ', 'ㅄ'),
];

/// Index of `c` as a leading consonant
pub fn lead_index(c: char) -> Option<u32> {
    LEADS.iter().position(|&l| l == c).map(|i| i as u32)
}

/// Index of `c` as a vowel
pub fn vowel_index(c: char) -> Option<u32> {
    let offset = (c as u32).wrapping_sub(VOWELS[0] as u32);
    (offset < VOWEL_COUNT).then_some(offset)
}

/// Trail index of `c` (1..=27), or None if it cannot close a syllable
pub fn trail_index(c: char) -> Option<u32> {
    TRAILS.iter().position(|&t| t == c).map(|i| i as u32 + 1)
}

pub fn is_vowel(c: char) -> bool {
    vowel_index(c).is_some()
}

/// Fold two vowels into a complex vowel (ㅗ + ㅏ = ㅘ)
pub fn combine_vowels(first: char, second: char) -> Option<char> {
    COMPLEX_VOWELS
        .iter()
        .find(|&&(a, b, _)| a == first && b == second)
        .map(|&(_, _, complex)| complex)
}

/// Split a complex vowel back into its two parts
pub fn split_vowel(complex: char) -> Option<(char, char)> {
    COMPLEX_VOWELS
        .iter()
        .find(|&&(_, _, c)| c == complex)
        .map(|&(a, b, _)| (a, b))
}

/// Fold two consonants into a complex trail (ㄹ + ㄱ = ㄺ)
pub fn combine_trails(first: char, second: char) -> Option<char> {
    COMPLEX_TRAILS
        .iter()
        .find(|&&(a, b, _)| a == first && b == second)
        .map(|&(_, _, complex)| complex)
}

/// Split a complex trail back into its two consonants
pub fn split_trail(complex: char) -> Option<(char, char)> {
    COMPLEX_TRAILS
        .iter()
        .find(|&&(_, _, c)| c == complex)
        .map(|&(a, b, _)| (a, b))
}

/// Build a precomposed syllable from lead/vowel/trail indices
pub fn compose_syllable(lead: u32, vowel: u32, trail: u32) -> Option<char> {
    if lead >= LEAD_COUNT || vowel >= VOWEL_COUNT || trail >= TRAIL_COUNT {
        return None;
    }
    char::from_u32(SYLLABLE_BASE + (lead * VOWEL_COUNT + vowel) * TRAIL_COUNT + trail)
}

/// Split a precomposed syllable into (lead, vowel, trail) indices
pub fn decompose_syllable(c: char) -> Option<(u32, u32, u32)> {
    let offset = (c as u32).wrapping_sub(SYLLABLE_BASE);
    if offset >= SYLLABLE_COUNT {
        return None;
    }
    let trail = offset % TRAIL_COUNT;
    let vowel = (offset / TRAIL_COUNT) % VOWEL_COUNT;
    let lead = offset / (VOWEL_COUNT * TRAIL_COUNT);
    Some((lead, vowel, trail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_syllable() {
        assert_eq!(compose_syllable(0, 0, 0), Some('가'));
        assert_eq!(compose_syllable(0, 0, 1), Some('각'));
        assert_eq!(compose_syllable(18, 0, 4), Some('한'));
        assert_eq!(compose_syllable(19, 0, 0), None);
    }

    #[test]
    fn test_decompose_syllable() {
        assert_eq!(decompose_syllable('가'), Some((0, 0, 0)));
        assert_eq!(decompose_syllable('글'), Some((0, 18, 8)));
        assert_eq!(decompose_syllable('힣'), Some((18, 20, 27)));
        assert_eq!(decompose_syllable('ㄱ'), None);
        assert_eq!(decompose_syllable('1'), None);
    }

    #[test]
    fn test_table_indices_line_up() {
        // Trail table and lead table share consonants at different indices
        assert_eq!(trail_index('ㄱ'), Some(1));
        assert_eq!(trail_index('ㅎ'), Some(27));
        assert_eq!(trail_index('ㄸ'), None);
        assert_eq!(lead_index('ㅎ'), Some(18));
        assert_eq!(lead_index('ㄳ'), None);
        assert_eq!(vowel_index('ㅣ'), Some(20));
        assert_eq!(vowel_index('ㄱ'), None);
    }

    #[test]
    fn test_complex_pairs() {
        assert_eq!(combine_vowels('ㅜ', 'ㅔ'), Some('ㅞ'));
        assert_eq!(combine_vowels('ㅏ', 'ㅗ'), None);
        assert_eq!(split_vowel('ㅢ'), Some(('ㅡ', 'ㅣ')));
        assert_eq!(combine_trails('ㅂ', 'ㅅ'), Some('ㅄ'));
        assert_eq!(combine_trails('ㄱ', 'ㄱ'), None);
        assert_eq!(split_trail('ㄺ'), Some(('ㄹ', 'ㄱ')));
        assert_eq!(split_trail('ㄲ'), None);
    }
}
