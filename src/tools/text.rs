//! The six text transforms. Each is a total function on any string,
//! including the empty string, and operates on Unicode scalar values
//! (`char`) as atomic units.

use rand::seq::SliceRandom;

/// Reverse the character order of `text`.
pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

/// Map every character to its uppercase form (locale-independent).
pub fn uppercase(text: &str) -> String {
    text.to_uppercase()
}

/// Map every character to its lowercase form (locale-independent).
pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Count maximal whitespace-delimited non-empty substrings.
/// Leading, trailing, and repeated whitespace do not affect the count.
pub fn word_count(text: &str) -> String {
    text.split_whitespace().count().to_string()
}

/// Count characters, whitespace included.
pub fn character_count(text: &str) -> String {
    text.chars().count().to_string()
}

/// Produce a uniformly random permutation of the characters.
/// Non-deterministic by design; whitespace shuffles like any other character.
pub fn shuffle(text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    chars.shuffle(&mut rand::rng());
    chars.into_iter().collect()
}
