//! Scoring logic
//!
//! Layout → validation → model tables → inference. Nothing here does I/O
//! except model file loading at startup.

pub mod layout;
pub mod validate;
pub mod model;
pub mod inference;

// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT};
pub use validate::{validate_features, FeatureVector, ValidationError};
pub use model::{LinearModel, ModelError};
pub use inference::{InferenceError, Label, Prediction, Probabilities, RiskLevel};
