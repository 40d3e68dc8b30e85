//! Character-level text comparison
//!
//! Positional comparison between the reference sentence and the typed text.
//! This is deliberately NOT an edit-distance algorithm: an inserted character
//! shifts every subsequent position and each shifted position counts as a
//! mistake. The downstream classifier was trained on exactly this definition,
//! so the simplification must be preserved.

use crate::types::ComparisonResult;

/// Positional character-level comparator.
pub struct TextComparator;

impl TextComparator {
    /// Compare `typed` against `reference` position by position.
    ///
    /// Both inputs are trimmed of leading/trailing whitespace first.
    /// Characters are Unicode scalar values; a position beyond the end of the
    /// shorter string is treated as an absent character that never equals a
    /// real one. When both trimmed strings are empty the result is
    /// `(0.0, 0)` by definition, not an error.
    pub fn compare(reference: &str, typed: &str) -> ComparisonResult {
        let ref_chars: Vec<char> = reference.trim().chars().collect();
        let typed_chars: Vec<char> = typed.trim().chars().collect();
        let max_len = ref_chars.len().max(typed_chars.len());

        if max_len == 0 {
            return ComparisonResult {
                accuracy_percent: 0.0,
                char_mistake_count: 0,
            };
        }

        let mistakes = (0..max_len)
            .filter(|&i| ref_chars.get(i) != typed_chars.get(i))
            .count();

        let accuracy = ((max_len - mistakes) as f64 / max_len as f64) * 100.0;

        ComparisonResult {
            accuracy_percent: round2(accuracy),
            char_mistake_count: mistakes as u32,
        }
    }
}

/// Round to 2 decimal places, the precision stored alongside sessions.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
