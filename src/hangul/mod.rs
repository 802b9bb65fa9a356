//! Jamo codec
//!
//! Converts between rendered text and the flat jamo sequence the edit
//! controller works on.
//!
//! ## Composition rules
//!
//! - A consonant that can lead a syllable, followed by a vowel, opens a block.
//! - The vowel absorbs a following vowel when the pair forms a complex vowel.
//! - A consonant after the vowel closes the block only if it is a valid trail
//!   and is not itself followed by a vowel; otherwise it leads the next block.
//! - A trail absorbs one more consonant when the pair forms a complex trail
//!   and the second consonant is not followed by a vowel.
//! - A standalone vowel pair forming a complex vowel renders as that vowel.
//! - Consonants never combine outside a syllable, and anything that is not
//!   compatibility jamo or a precomposed syllable passes through untouched.
//!
//! `disassemble(&assemble(s)) == s` holds for every sequence produced by
//! `disassemble`, so each jamo of a sequence survives a round trip.

pub mod tables;

use tables::{
    combine_trails, combine_vowels, compose_syllable, decompose_syllable, is_vowel, lead_index,
    split_trail, split_vowel, trail_index, vowel_index, LEADS, TRAILS, VOWELS,
};

/// Decompose text into its jamo sequence
pub fn disassemble(text: &str) -> Vec<char> {
    let mut jamo = Vec::with_capacity(text.len());
    for ch in text.chars() {
        push_jamo(ch, &mut jamo);
    }
    jamo
}

/// Decompose a single rendered character
pub fn disassemble_char(ch: char) -> Vec<char> {
    let mut jamo = Vec::with_capacity(5);
    push_jamo(ch, &mut jamo);
    jamo
}

/// Number of jamo a rendered character folds together (1 for non-Hangul)
pub fn jamo_count(ch: char) -> usize {
    if let Some((_, vowel, trail)) = decompose_syllable(ch) {
        let vowel_len = if split_vowel(VOWELS[vowel as usize]).is_some() { 2 } else { 1 };
        let trail_len = match trail {
            0 => 0,
            t if split_trail(TRAILS[t as usize - 1]).is_some() => 2,
            _ => 1,
        };
        1 + vowel_len + trail_len
    } else if split_vowel(ch).is_some() || split_trail(ch).is_some() {
        2
    } else {
        1
    }
}

/// Recompose a jamo sequence into rendered text
pub fn assemble(jamo: &[char]) -> String {
    let mut out = String::with_capacity(jamo.len() * 3);
    let mut i = 0;

    while i < jamo.len() {
        let ch = jamo[i];
        let next = jamo.get(i + 1).copied();

        if let Some(lead) = lead_index(ch) {
            if let Some((syllable, consumed)) = compose_block(lead, &jamo[i + 1..]) {
                out.push(syllable);
                i += 1 + consumed;
                continue;
            }
        }

        if is_vowel(ch) {
            if let Some(complex) = next.and_then(|n| combine_vowels(ch, n)) {
                out.push(complex);
                i += 2;
                continue;
            }
        }

        out.push(ch);
        i += 1;
    }

    out
}

/// Round trip through the codec
pub fn normalize(text: &str) -> String {
    assemble(&disassemble(text))
}

fn push_jamo(ch: char, out: &mut Vec<char>) {
    if let Some((lead, vowel, trail)) = decompose_syllable(ch) {
        out.push(LEADS[lead as usize]);
        push_split(VOWELS[vowel as usize], out);
        if trail > 0 {
            push_split(TRAILS[trail as usize - 1], out);
        }
    } else {
        push_split(ch, out);
    }
}

fn push_split(ch: char, out: &mut Vec<char>) {
    match split_vowel(ch).or_else(|| split_trail(ch)) {
        Some((first, second)) => {
            out.push(first);
            out.push(second);
        }
        None => out.push(ch),
    }
}

/// Build one syllable from a lead and the jamo after it.
///
/// Returns the syllable and how many jamo of `rest` it consumed, or None
/// when `rest` does not start with a vowel.
fn compose_block(lead: u32, rest: &[char]) -> Option<(char, usize)> {
    let mut vowel = *rest.first().filter(|c| is_vowel(**c))?;
    let mut used = 1;

    if let Some(complex) = rest.get(1).and_then(|&n| combine_vowels(vowel, n)) {
        vowel = complex;
        used = 2;
    }

    let mut trail = None;
    if let Some(&first) = rest.get(used) {
        if trail_index(first).is_some() && !vowel_at(rest, used + 1) {
            trail = Some(first);
            used += 1;

            if let Some(complex) = rest.get(used).and_then(|&n| combine_trails(first, n)) {
                if !vowel_at(rest, used + 1) {
                    trail = Some(complex);
                    used += 1;
                }
            }
        }
    }

    let trail = trail.and_then(trail_index).unwrap_or(0);
    let syllable = compose_syllable(lead, vowel_index(vowel)?, trail)?;
    Some((syllable, used))
}

fn vowel_at(jamo: &[char], index: usize) -> bool {
    jamo.get(index).is_some_and(|&c| is_vowel(c))
}
