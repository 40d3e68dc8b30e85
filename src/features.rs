//! Derived feature computation
//!
//! Pure guarded-division functions that turn raw session measurements into
//! the named feature values. Every division returns `0.0` instead of failing
//! when its denominator is non-positive, so no input can produce NaN,
//! infinity, or a panic. The guards are a documented policy, not a logged
//! condition.

/// Typing speed: trimmed typed length over elapsed seconds.
///
/// Returns `0.0` when `time_taken_sec` is zero or negative.
pub fn chars_per_sec(typed_len: u32, time_taken_sec: f64) -> f64 {
    if time_taken_sec > 0.0 {
        typed_len as f64 / time_taken_sec
    } else {
        0.0
    }
}

/// Character-level mistake density over the trimmed reference length.
///
/// Returns `0.0` when the reference is empty.
pub fn mistakes_per_char(char_mistake_count: u32, reference_len: u32) -> f64 {
    if reference_len > 0 {
        char_mistake_count as f64 / reference_len as f64
    } else {
        0.0
    }
}

/// Correction-effort proxy: `max(0, (reference_len - typed_len) + mistakes)`.
///
/// Integer-valued and always >= 0. A typed text longer than the reference
/// can still score above zero when the mistake count outweighs the surplus.
pub fn difficulty_score(reference_len: u32, typed_len: u32, char_mistake_count: u32) -> u32 {
    let deficit = i64::from(reference_len) - i64::from(typed_len);
    (deficit + i64::from(char_mistake_count)).max(0) as u32
}

/// Word-level mistake density over the trimmed reference length.
///
/// Normalized by character length, not word count: this keeps the value
/// comparable with `mistakes_per_char` and matches the data the classifier
/// was trained on. Returns `0.0` when the reference is empty.
pub fn word_mistake_rate(word_mistake_count: u32, reference_len: u32) -> f64 {
    if reference_len > 0 {
        word_mistake_count as f64 / reference_len as f64
    } else {
        0.0
    }
}
