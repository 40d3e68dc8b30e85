//! Persisted session schema
//!
//! The session store itself (a CSV file of logged typing sessions) is owned
//! by an external collaborator; this module defines the row shape so the core
//! can reconstruct a [`RawSessionInput`] from a stored row and re-derive
//! features from historical data.
//!
//! Column order is part of the external contract and matches the logger's
//! header exactly; serde struct field order is what the `csv` crate writes,
//! so the declaration order below must not change.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::io;

use crate::error::FeatureError;
use crate::types::{RawSessionInput, SessionRecord, StressLabel};

/// Timestamp format used by the session logger.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the persisted session store.
///
/// `sleep_hours` and `self_stress_level` may be empty in stored data;
/// `backspace_estimate` is the correction-effort proxy as logged at capture
/// time, kept distinguishable from the recomputed `difficulty_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRow {
    pub session_id: u64,
    pub user_id: String,
    pub reference_text: String,
    pub reference_text_len: u32,
    pub typed_text: String,
    pub typed_text_len: u32,
    pub time_taken_sec: f64,
    pub accuracy_percent: f64,
    pub mistake_count: u32,
    pub backspace_estimate: u32,
    pub date_time: String,
    pub self_stress_level: Option<i64>,
    pub sleep_hours: Option<f64>,
    pub notes: String,
}

impl SessionRow {
    /// Reconstruct the raw capture input this row was logged from.
    ///
    /// A stress level outside `{0, 1, 2}` is rejected with
    /// [`FeatureError::InvalidStressLevel`], never clamped. The stored
    /// `sleep_hours` value round-trips through its raw string form so the
    /// pipeline's lenient parsing applies uniformly.
    pub fn to_raw_input(&self) -> Result<RawSessionInput, FeatureError> {
        let self_stress_level = self
            .self_stress_level
            .map(StressLabel::try_from)
            .transpose()?;

        let sleep_hours_raw = match self.sleep_hours {
            Some(hours) => hours.to_string(),
            None => String::new(),
        };

        Ok(RawSessionInput {
            reference_text: self.reference_text.clone(),
            typed_text: self.typed_text.clone(),
            time_taken_sec: self.time_taken_sec,
            sleep_hours_raw,
            self_stress_level,
        })
    }

    /// Parse the logged timestamp.
    pub fn parsed_date_time(&self) -> Result<NaiveDateTime, FeatureError> {
        NaiveDateTime::parse_from_str(&self.date_time, DATE_TIME_FORMAT)
            .map_err(|e| FeatureError::DateParseError(format!("{}: {e}", self.date_time)))
    }
}

/// One row of the derived-features output.
///
/// The original session columns followed by the derived feature columns, the
/// shape consumed by classifier training. `sleep_hours` is filled with `0.0`
/// where the stored row left it empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub session_id: u64,
    pub user_id: String,
    pub reference_text: String,
    pub reference_text_len: u32,
    pub typed_text: String,
    pub typed_text_len: u32,
    pub time_taken_sec: f64,
    pub accuracy_percent: f64,
    pub mistake_count: u32,
    pub backspace_estimate: u32,
    pub date_time: String,
    pub self_stress_level: Option<i64>,
    pub sleep_hours: f64,
    pub notes: String,
    pub chars_per_sec: f64,
    pub mistakes_per_char: f64,
    pub difficulty_score: f64,
    pub word_mistake_count: u32,
    pub word_mistake_rate: f64,
}

impl FeatureRow {
    /// Combine a stored row with the record re-derived from it.
    pub fn from_session(row: &SessionRow, record: &SessionRecord) -> Self {
        Self {
            session_id: row.session_id,
            user_id: row.user_id.clone(),
            reference_text: row.reference_text.clone(),
            reference_text_len: row.reference_text_len,
            typed_text: row.typed_text.clone(),
            typed_text_len: row.typed_text_len,
            time_taken_sec: row.time_taken_sec,
            accuracy_percent: row.accuracy_percent,
            mistake_count: row.mistake_count,
            backspace_estimate: row.backspace_estimate,
            date_time: row.date_time.clone(),
            self_stress_level: row.self_stress_level,
            sleep_hours: record.features.sleep_hours,
            notes: row.notes.clone(),
            chars_per_sec: record.features.chars_per_sec,
            mistakes_per_char: record.features.mistakes_per_char,
            difficulty_score: record.features.difficulty_score,
            word_mistake_count: record.word_mismatch.word_mistake_count,
            word_mistake_rate: record.features.word_mistake_rate,
        }
    }
}

/// Read all session rows from a CSV reader (header expected).
pub fn read_session_rows<R: io::Read>(reader: R) -> Result<Vec<SessionRow>, FeatureError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Write feature rows as CSV (header included).
pub fn write_feature_rows<W: io::Write>(
    writer: W,
    rows: &[FeatureRow],
) -> Result<(), FeatureError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
