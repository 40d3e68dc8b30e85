//! Error types for the keysense feature engine

use thiserror::Error;

/// Errors that can occur while reconstructing sessions or deriving features.
///
/// Guarded arithmetic (division by an empty reference or non-positive elapsed
/// time) and unparsable sleep-hours input are NOT errors; both degrade to
/// `0.0` as documented on the functions involved. Everything outside those
/// documented defaults fails loudly through one of these variants.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Invalid self-reported stress level: {0} (expected 0, 1, or 2)")]
    InvalidStressLevel(i64),

    #[error("Invalid CSV row: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Classifier model unavailable: {0}")]
    MissingModel(String),

    #[error("Prediction error: {0}")]
    PredictionError(String),
}
