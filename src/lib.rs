//! Keysense - Typing-session feature engine for keystroke-based stress inference
//!
//! Keysense turns a recorded typing session (reference sentence, typed text,
//! elapsed time, self-reported sleep hours) into a fixed-schema numeric
//! feature vector for a downstream stress classifier, through one canonical
//! deterministic pipeline: character comparison → word comparison → guarded
//! feature derivation → ordered vector assembly.
//!
//! ## Modules
//!
//! - **compare / words**: positional character- and word-level mismatch scoring
//! - **features**: guarded ratio computations (never NaN, never a panic)
//! - **pipeline**: the single canonical builder of session records
//! - **store**: persisted session row schema and batch re-derivation support
//! - **classifier**: the opaque prediction collaborator seam
//! - **selector**: caller-owned reference sentence selection

pub mod classifier;
pub mod compare;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod selector;
pub mod store;
pub mod types;
pub mod words;

pub use classifier::StressClassifier;
pub use compare::TextComparator;
pub use error::FeatureError;
pub use pipeline::{build_session_record, DifficultySource, SessionProcessor};
pub use selector::{SentencePicker, DEFAULT_SENTENCES};
pub use store::{FeatureRow, SessionRow};
pub use types::{
    ComparisonResult, FeatureVector, RawSessionInput, SessionRecord, StressLabel,
    WordMismatchResult,
};
pub use words::WordMismatchCounter;

/// Keysense version embedded in CLI output
pub const KEYSENSE_VERSION: &str = env!("CARGO_PKG_VERSION");
