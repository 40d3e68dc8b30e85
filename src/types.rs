//! Core data types for typing-session feature extraction
//!
//! This module defines the types that flow through the feature pipeline, from
//! raw captured input to the fixed-order vector handed to the classifier.

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

/// Self-reported or predicted stress level.
///
/// The integer codes are part of the external contract: they appear in the
/// persisted session store and in the classifier's training labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum StressLabel {
    Calm,
    Normal,
    Stressed,
}

impl StressLabel {
    /// Integer code as stored and as returned by the classifier.
    pub fn code(&self) -> i64 {
        match self {
            StressLabel::Calm => 0,
            StressLabel::Normal => 1,
            StressLabel::Stressed => 2,
        }
    }

    /// Human-readable label name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StressLabel::Calm => "Calm",
            StressLabel::Normal => "Normal",
            StressLabel::Stressed => "Stressed",
        }
    }
}

impl TryFrom<i64> for StressLabel {
    type Error = FeatureError;

    /// Codes outside `{0, 1, 2}` are rejected, never clamped.
    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(StressLabel::Calm),
            1 => Ok(StressLabel::Normal),
            2 => Ok(StressLabel::Stressed),
            other => Err(FeatureError::InvalidStressLevel(other)),
        }
    }
}

impl From<StressLabel> for i64 {
    fn from(label: StressLabel) -> i64 {
        label.code()
    }
}

impl std::fmt::Display for StressLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw captured input for one typing session.
///
/// Produced by a capture collaborator (CLI prompt, GUI, or a stored row) and
/// immutable afterwards. The core never reads a clock: `time_taken_sec` is
/// measured by the capture boundary and injected here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSessionInput {
    /// The sentence the user was asked to type verbatim.
    pub reference_text: String,
    /// What the user actually entered.
    pub typed_text: String,
    /// Elapsed wall-clock seconds between start and submit.
    pub time_taken_sec: f64,
    /// Self-reported sleep hours, exactly as entered (may be empty).
    ///
    /// Parsing is deliberately lenient: empty or unparsable input maps to
    /// `0.0` downstream instead of raising an error.
    #[serde(default)]
    pub sleep_hours_raw: String,
    /// Self-reported stress level, when the user provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_stress_level: Option<StressLabel>,
}

/// Character-level comparison outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Positional accuracy in percent, rounded to 2 decimals, in `[0, 100]`.
    pub accuracy_percent: f64,
    /// Number of character positions that differ.
    pub char_mistake_count: u32,
}

/// Word-level comparison outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMismatchResult {
    /// Positional word mismatches plus unmatched trailing words.
    pub word_mistake_count: u32,
}

/// Fixed-order numeric vector consumed by the stress classifier.
///
/// Field order IS the classifier's trained column order; reordering silently
/// corrupts predictions. Serde serialization preserves the declaration order,
/// and [`FeatureVector::to_array`] emits values in the same order. Only the
/// pipeline builder constructs this type; consumers must not assemble ad hoc
/// field lists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Typing speed: trimmed typed length / elapsed seconds.
    pub chars_per_sec: f64,
    /// Character mistake density over the trimmed reference length.
    pub mistakes_per_char: f64,
    /// Correction-effort proxy: `max(0, (ref_len - typed_len) + mistakes)`.
    pub difficulty_score: f64,
    /// Word mistake density over the trimmed reference length.
    pub word_mistake_rate: f64,
    /// Positional character accuracy in percent.
    pub accuracy_percent: f64,
    /// Self-reported sleep hours (0.0 when absent or unparsable).
    pub sleep_hours: f64,
}

impl FeatureVector {
    /// Column names in classifier order.
    pub const COLUMNS: [&'static str; 6] = [
        "chars_per_sec",
        "mistakes_per_char",
        "difficulty_score",
        "word_mistake_rate",
        "accuracy_percent",
        "sleep_hours",
    ];

    /// Values in the same order as [`FeatureVector::COLUMNS`].
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.chars_per_sec,
            self.mistakes_per_char,
            self.difficulty_score,
            self.word_mistake_rate,
            self.accuracy_percent,
            self.sleep_hours,
        ]
    }
}

/// Everything known about one scored typing session.
///
/// Built once per session by the pipeline and read-only afterwards. Callers
/// that need persistence or a prediction hand this to the respective
/// collaborator; neither is required for the record to exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The raw input the record was built from.
    pub raw: RawSessionInput,
    /// Trimmed reference length in Unicode scalar values.
    pub reference_len: u32,
    /// Trimmed typed length in Unicode scalar values.
    pub typed_len: u32,
    /// Character-level comparison outcome.
    pub comparison: ComparisonResult,
    /// Word-level comparison outcome.
    pub word_mismatch: WordMismatchResult,
    /// The classifier-ready vector.
    pub features: FeatureVector,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_label_codes_round_trip() {
        for label in [StressLabel::Calm, StressLabel::Normal, StressLabel::Stressed] {
            let rebuilt = StressLabel::try_from(label.code()).unwrap();
            assert_eq!(rebuilt, label);
        }
    }

    #[test]
    fn test_stress_label_rejects_out_of_range() {
        let err = StressLabel::try_from(3).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidStressLevel(3)));

        let err = StressLabel::try_from(-1).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidStressLevel(-1)));
    }

    #[test]
    fn test_stress_label_serializes_as_integer() {
        let json = serde_json::to_string(&StressLabel::Stressed).unwrap();
        assert_eq!(json, "2");

        let parsed: StressLabel = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, StressLabel::Calm);
    }

    #[test]
    fn test_feature_vector_serde_preserves_column_order() {
        let vector = FeatureVector {
            chars_per_sec: 3.0,
            mistakes_per_char: 0.1,
            difficulty_score: 2.0,
            word_mistake_rate: 0.05,
            accuracy_percent: 95.5,
            sleep_hours: 7.0,
        };

        let json = serde_json::to_string(&vector).unwrap();
        let positions: Vec<usize> = FeatureVector::COLUMNS
            .iter()
            .map(|col| json.find(&format!("\"{col}\"")).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "serialized field order must match COLUMNS");
    }

    #[test]
    fn test_feature_vector_array_matches_columns() {
        let vector = FeatureVector {
            chars_per_sec: 1.0,
            mistakes_per_char: 2.0,
            difficulty_score: 3.0,
            word_mistake_rate: 4.0,
            accuracy_percent: 5.0,
            sleep_hours: 6.0,
        };
        assert_eq!(vector.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
