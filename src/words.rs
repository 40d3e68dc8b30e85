//! Word-level mismatch counting
//!
//! Positional word comparison with no normalization: case, punctuation, and
//! spelling differences all count, mirroring raw typing fidelity.

use crate::types::WordMismatchResult;

/// Positional word-level mismatch counter.
pub struct WordMismatchCounter;

impl WordMismatchCounter {
    /// Count mismatched words between `reference` and `typed`.
    ///
    /// Both strings are split on whitespace. Words are compared position by
    /// position (exact, case-sensitive equality) up to the shorter sequence's
    /// length; each unmatched trailing word on the longer side then counts as
    /// one additional mistake.
    pub fn count(reference: &str, typed: &str) -> WordMismatchResult {
        let ref_words: Vec<&str> = reference.split_whitespace().collect();
        let typed_words: Vec<&str> = typed.split_whitespace().collect();

        let positional = ref_words
            .iter()
            .zip(typed_words.iter())
            .filter(|(rw, tw)| rw != tw)
            .count();
        let trailing = ref_words.len().abs_diff(typed_words.len());

        WordMismatchResult {
            word_mistake_count: (positional + trailing) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_substitution() {
        let result = WordMismatchCounter::count("the cat sat", "the dog sat");
        assert_eq!(result.word_mistake_count, 1);
    }

    #[test]
    fn test_missing_trailing_word() {
        let result = WordMismatchCounter::count("a b c", "a b");
        assert_eq!(result.word_mistake_count, 1);
    }

    #[test]
    fn test_extra_trailing_words() {
        let result = WordMismatchCounter::count("a b", "a b c d");
        assert_eq!(result.word_mistake_count, 2);
    }

    #[test]
    fn test_identical_sentences() {
        let result = WordMismatchCounter::count("quick brown fox", "quick brown fox");
        assert_eq!(result.word_mistake_count, 0);
    }

    #[test]
    fn test_case_is_significant() {
        let result = WordMismatchCounter::count("The cat", "the cat");
        assert_eq!(result.word_mistake_count, 1);
    }

    #[test]
    fn test_punctuation_is_significant() {
        let result = WordMismatchCounter::count("hello, world", "hello world");
        assert_eq!(result.word_mistake_count, 1);
    }

    #[test]
    fn test_both_empty() {
        let result = WordMismatchCounter::count("", "");
        assert_eq!(result.word_mistake_count, 0);
    }

    #[test]
    fn test_repeated_whitespace_is_collapsed_by_splitting() {
        let result = WordMismatchCounter::count("a  b   c", "a b c");
        assert_eq!(result.word_mistake_count, 0);
    }
}
