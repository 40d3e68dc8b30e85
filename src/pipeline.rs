//! Session pipeline orchestration
//!
//! The single canonical path from raw captured input to a finished
//! [`SessionRecord`]: character comparison → word comparison → guarded
//! feature derivation → fixed-order vector assembly. Every consumer (CLI,
//! batch re-derivation, classifier callers) goes through this module rather
//! than re-implementing any step; this is the only place that knows the
//! classifier's column order.

use crate::compare::TextComparator;
use crate::error::FeatureError;
use crate::features;
use crate::store::SessionRow;
use crate::types::{FeatureVector, RawSessionInput, SessionRecord};
use crate::words::WordMismatchCounter;

/// Which computation fills the `difficulty_score` feature when re-deriving
/// from stored rows.
///
/// The canonical choice is [`DifficultySource::Recomputed`]: derive the score
/// from the stored text, the same way live capture does. Historical batch
/// output instead copied the logged `backspace_estimate` column verbatim;
/// [`DifficultySource::LoggedEstimate`] reproduces that for exact parity with
/// models trained on the old batch path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultySource {
    /// Recompute from text: `max(0, (ref_len - typed_len) + mistakes)`.
    #[default]
    Recomputed,
    /// Copy the `backspace_estimate` column as logged at capture time.
    LoggedEstimate,
}

/// Build a session record from raw captured input (stateless, one-shot).
///
/// `sleep_hours_raw` is parsed leniently: empty or unparsable input becomes
/// `0.0` with no error raised. All other derivations follow the guarded
/// arithmetic in [`crate::features`]. Deterministic: identical input always
/// produces an identical record.
pub fn build_session_record(raw: RawSessionInput) -> SessionRecord {
    let reference_len = raw.reference_text.trim().chars().count() as u32;
    let typed_len = raw.typed_text.trim().chars().count() as u32;

    let comparison = TextComparator::compare(&raw.reference_text, &raw.typed_text);
    let word_mismatch = WordMismatchCounter::count(&raw.reference_text, &raw.typed_text);

    let features = FeatureVector {
        chars_per_sec: features::chars_per_sec(typed_len, raw.time_taken_sec),
        mistakes_per_char: features::mistakes_per_char(
            comparison.char_mistake_count,
            reference_len,
        ),
        difficulty_score: features::difficulty_score(
            reference_len,
            typed_len,
            comparison.char_mistake_count,
        ) as f64,
        word_mistake_rate: features::word_mistake_rate(
            word_mismatch.word_mistake_count,
            reference_len,
        ),
        accuracy_percent: comparison.accuracy_percent,
        sleep_hours: parse_sleep_hours(&raw.sleep_hours_raw),
    };

    SessionRecord {
        raw,
        reference_len,
        typed_len,
        comparison,
        word_mismatch,
        features,
    }
}

/// Parse self-reported sleep hours.
///
/// Empty, unparsable, or non-finite input degrades to `0.0`. This lenient
/// policy is deliberate and applies only to this field; other malformed
/// numeric data in the system fails loudly.
pub fn parse_sleep_hours(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(hours) if hours.is_finite() => hours,
        _ => 0.0,
    }
}

/// Processor for building records live and re-deriving them from the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionProcessor {
    difficulty_source: DifficultySource,
}

impl SessionProcessor {
    /// Create a processor using the canonical recomputed difficulty score.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with an explicit difficulty-score source.
    pub fn with_difficulty_source(difficulty_source: DifficultySource) -> Self {
        Self { difficulty_source }
    }

    /// Build a record from live capture input.
    ///
    /// Live input carries no logged estimate, so the difficulty score is
    /// always recomputed here regardless of the configured source.
    pub fn build(&self, raw: RawSessionInput) -> SessionRecord {
        build_session_record(raw)
    }

    /// Re-derive a record from a stored session row.
    ///
    /// Fails if the stored stress level is outside `{0, 1, 2}`.
    pub fn rederive_row(&self, row: &SessionRow) -> Result<SessionRecord, FeatureError> {
        let raw = row.to_raw_input()?;
        let mut record = build_session_record(raw);
        if self.difficulty_source == DifficultySource::LoggedEstimate {
            record.features.difficulty_score = f64::from(row.backspace_estimate);
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_raw() -> RawSessionInput {
        RawSessionInput {
            reference_text: "cat".to_string(),
            typed_text: "car".to_string(),
            time_taken_sec: 1.0,
            sleep_hours_raw: "7".to_string(),
            self_stress_level: None,
        }
    }

    #[test]
    fn test_end_to_end_session_record() {
        let record = build_session_record(sample_raw());

        assert_eq!(record.reference_len, 3);
        assert_eq!(record.typed_len, 3);
        assert_eq!(record.comparison.accuracy_percent, 66.67);
        assert_eq!(record.comparison.char_mistake_count, 1);
        assert_eq!(record.word_mismatch.word_mistake_count, 1);

        let features = &record.features;
        assert_eq!(features.chars_per_sec, 3.0);
        assert!((features.mistakes_per_char - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(features.difficulty_score, 1.0);
        assert!((features.word_mistake_rate - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(features.accuracy_percent, 66.67);
        assert_eq!(features.sleep_hours, 7.0);
    }

    #[test]
    fn test_repeated_builds_are_identical() {
        let first = build_session_record(sample_raw());
        let second = build_session_record(sample_raw());
        assert_eq!(first.features, second.features);
        assert_eq!(first.features.to_array(), second.features.to_array());
    }

    #[test]
    fn test_empty_reference_guards_all_ratios() {
        let record = build_session_record(RawSessionInput {
            reference_text: String::new(),
            typed_text: String::new(),
            time_taken_sec: 0.0,
            sleep_hours_raw: String::new(),
            self_stress_level: None,
        });

        let features = &record.features;
        assert_eq!(features.chars_per_sec, 0.0);
        assert_eq!(features.mistakes_per_char, 0.0);
        assert_eq!(features.word_mistake_rate, 0.0);
        assert_eq!(features.difficulty_score, 0.0);
        assert_eq!(features.accuracy_percent, 0.0);
        assert!(features.to_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_sleep_hours_lenient_parsing() {
        assert_eq!(parse_sleep_hours("7"), 7.0);
        assert_eq!(parse_sleep_hours(" 6.5 "), 6.5);
        assert_eq!(parse_sleep_hours(""), 0.0);
        assert_eq!(parse_sleep_hours("eight"), 0.0);
        assert_eq!(parse_sleep_hours("NaN"), 0.0);
        assert_eq!(parse_sleep_hours("inf"), 0.0);
    }

    #[test]
    fn test_rederive_recomputes_difficulty_by_default() {
        let row = sample_row_with_estimate(9);
        let record = SessionProcessor::new().rederive_row(&row).unwrap();
        // "cat" vs "car": deficit 0 + 1 mistake = 1, not the logged 9.
        assert_eq!(record.features.difficulty_score, 1.0);
    }

    #[test]
    fn test_rederive_can_use_logged_estimate_for_parity() {
        let row = sample_row_with_estimate(9);
        let processor =
            SessionProcessor::with_difficulty_source(DifficultySource::LoggedEstimate);
        let record = processor.rederive_row(&row).unwrap();
        assert_eq!(record.features.difficulty_score, 9.0);
        // Everything else still comes from the canonical derivation.
        assert_eq!(record.features.accuracy_percent, 66.67);
    }

    #[test]
    fn test_rederive_rejects_invalid_stress_level() {
        let mut row = sample_row_with_estimate(0);
        row.self_stress_level = Some(7);
        let err = SessionProcessor::new().rederive_row(&row).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidStressLevel(7)));
    }

    fn sample_row_with_estimate(backspace_estimate: u32) -> SessionRow {
        SessionRow {
            session_id: 1,
            user_id: "user1".to_string(),
            reference_text: "cat".to_string(),
            reference_text_len: 3,
            typed_text: "car".to_string(),
            typed_text_len: 3,
            time_taken_sec: 1.0,
            accuracy_percent: 66.67,
            mistake_count: 1,
            backspace_estimate,
            date_time: "2024-03-01 18:30:00".to_string(),
            self_stress_level: Some(1),
            sleep_hours: Some(7.0),
            notes: String::new(),
        }
    }
}
