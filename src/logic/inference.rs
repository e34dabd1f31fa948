//! Inference - z-score normalization, linear combination and sigmoid
//!
//! The sigmoid output is the probability of the *benign* class. The constant
//! tables were fitted with that polarity, so it must not be flipped here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::layout::FEATURE_COUNT;
use super::model::LinearModel;
use super::validate::FeatureVector;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Benign,
    Malignant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    High,
}

impl From<Label> for RiskLevel {
    fn from(label: Label) -> Self {
        match label {
            Label::Benign => RiskLevel::Low,
            Label::Malignant => RiskLevel::High,
        }
    }
}

/// Class probabilities as percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Probabilities {
    pub malignant: f64,
    pub benign: f64,
}

/// Prediction output
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: Label,
    pub confidence: f64,          // 50 - 100
    pub probabilities: Probabilities,
    pub risk_level: RiskLevel,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("linear score is undefined ({0})")]
    UndefinedScore(f64),
}

// ============================================================================
// PIPELINE STEPS
// ============================================================================

/// Logistic function. IEEE-754 `exp` saturates to infinity, so very negative
/// inputs give exactly 0.0 rather than a fault.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl LinearModel {
    /// z-score each feature against the model's reference statistics
    pub fn normalize(&self, features: &FeatureVector) -> [f64; FEATURE_COUNT] {
        let stats = self.stats();
        let mut normalized = [0.0f64; FEATURE_COUNT];

        for (i, &x) in features.as_array().iter().enumerate() {
            normalized[i] = (x - stats.means[i]) / stats.stds[i];
        }

        normalized
    }

    /// `intercept + Σ z[i] * coefficient[i]`
    pub fn linear_score(&self, features: &FeatureVector) -> f64 {
        let weights = self.weights();
        self.normalize(features)
            .iter()
            .zip(weights.coefficients.iter())
            .fold(weights.intercept, |acc, (z, c)| acc + z * c)
    }

    /// Benign probability in [0, 1]
    ///
    /// A single overflowing term gives a score of ±inf, which saturates to
    /// exactly 1.0 or 0.0. Only opposing overflows (`inf - inf`) are undefined.
    pub fn benign_probability(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let score = self.linear_score(features);
        if score.is_nan() {
            return Err(InferenceError::UndefinedScore(score));
        }
        Ok(sigmoid(score))
    }

    /// Score a validated vector
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        let p = self.benign_probability(features)?;

        // Exactly 0.5 falls to malignant.
        let label = if p > 0.5 { Label::Benign } else { Label::Malignant };

        let probabilities = Probabilities {
            malignant: (1.0 - p) * 100.0,
            benign: p * 100.0,
        };

        Ok(Prediction {
            label,
            confidence: probabilities.malignant.max(probabilities.benign),
            probabilities,
            risk_level: label.into(),
            timestamp: Utc::now(),
        })
    }
}
