//! Classifier collaborator interface
//!
//! The stress classifier is an opaque external collaborator: a trained model
//! that maps a feature vector to a label. The feature pipeline never depends
//! on one being present; building a [`crate::types::SessionRecord`] succeeds
//! whether or not a model is loadable, and a missing model surfaces as
//! [`crate::error::FeatureError::MissingModel`] only in callers that actually
//! ask for a prediction.

use crate::error::FeatureError;
use crate::types::{FeatureVector, StressLabel};

/// An opaque stress classifier.
///
/// Implementations receive the vector in the fixed column order of
/// [`FeatureVector::COLUMNS`], the order the model was trained on.
pub trait StressClassifier {
    /// Predict a stress label for one feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<StressLabel, FeatureError>;
}
