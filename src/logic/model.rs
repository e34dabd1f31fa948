//! Linear Model - constant tables and loading
//!
//! The built-in tables are the per-feature means and standard deviations of
//! the reference training set, plus logistic-regression coefficients. A JSON
//! model file can replace them at startup. Either way the tables are checked
//! once here and never mutated afterwards.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layout::{layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};

// ============================================================================
// BUILT-IN TABLES
// ============================================================================

pub const BUILTIN_MODEL_NAME: &str = "builtin-logistic-v1";

const FEATURE_MEANS: [f64; FEATURE_COUNT] = [
    14.127292, 19.289649, 91.969033, 654.889104, 0.09636, 0.104341, 0.088799, 0.048919, 0.181162, 0.062798,
    0.405172, 1.216853, 2.866059, 40.337079, 0.007041, 0.025478, 0.031894, 0.011796, 0.020542, 0.003795,
    16.26919, 25.677223, 107.261213, 880.583128, 0.132369, 0.254265, 0.272188, 0.114606, 0.290076, 0.083946,
];

const FEATURE_STDS: [f64; FEATURE_COUNT] = [
    3.524049, 4.301036, 24.298981, 351.914129, 0.014064, 0.052813, 0.07972, 0.038803, 0.027414, 0.00706,
    0.277313, 0.551648, 2.021855, 45.491006, 0.003003, 0.017908, 0.030186, 0.00617, 0.008266, 0.002646,
    4.833242, 6.146258, 33.602542, 569.356993, 0.022832, 0.157336, 0.208624, 0.065732, 0.061867, 0.018061,
];

const COEFFICIENTS: [f64; FEATURE_COUNT] = [
    1.2, -0.3, 0.8, 0.1, -2.5, 1.8, 2.1, 3.5, -0.7, 0.4,
    -0.2, 0.1, -0.3, 0.05, -1.8, 1.2, 1.5, 2.8, -0.5, 0.3,
    1.5, -0.4, 1.0, 0.15, -2.2, 2.0, 2.5, 4.0, -0.9, 0.6,
];

const INTERCEPT: f64 = 0.5;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Per-feature z-score normalization parameters
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStats {
    pub means: [f64; FEATURE_COUNT],
    pub stds: [f64; FEATURE_COUNT],
}

/// Coefficients paired positionally with the normalized vector
#[derive(Debug, Clone, PartialEq)]
pub struct ModelWeights {
    pub coefficients: [f64; FEATURE_COUNT],
    pub intercept: f64,
}

/// A checked, immutable scoring model
#[derive(Debug, Clone)]
pub struct LinearModel {
    name: String,
    stats: FeatureStats,
    weights: ModelWeights,
    loaded_at: DateTime<Utc>,
}

/// On-disk model description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelFile {
    pub name: String,
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub layout_version: Option<u8>,
    #[serde(default)]
    pub layout_hash: Option<u32>,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Model configuration errors. Raised at load time only.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("table `{table}` has {actual} entries, expected {expected}")]
    TableLength { table: &'static str, expected: usize, actual: usize },

    #[error("standard deviation for `{feature}` (index {index}) must be finite and non-zero, got {value}")]
    InvalidStd { index: usize, feature: &'static str, value: f64 },

    #[error("`{table}` entry {index} is not finite")]
    NonFinite { table: &'static str, index: usize },

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

impl LinearModel {
    /// Build and check a model from its parts
    pub fn new(name: impl Into<String>, stats: FeatureStats, weights: ModelWeights) -> Result<Self, ModelError> {
        check_finite("means", &stats.means)?;
        check_finite("coefficients", &weights.coefficients)?;
        check_finite("intercept", &[weights.intercept])?;

        for (index, &value) in stats.stds.iter().enumerate() {
            if !value.is_finite() || value == 0.0 {
                return Err(ModelError::InvalidStd {
                    index,
                    feature: FEATURE_LAYOUT[index],
                    value,
                });
            }
        }

        Ok(Self {
            name: name.into(),
            stats,
            weights,
            loaded_at: Utc::now(),
        })
    }

    /// The compiled-in reference model
    pub fn builtin() -> Result<Self, ModelError> {
        Self::new(
            BUILTIN_MODEL_NAME,
            FeatureStats { means: FEATURE_MEANS, stds: FEATURE_STDS },
            ModelWeights { coefficients: COEFFICIENTS, intercept: INTERCEPT },
        )
    }

    /// Load a model description from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        tracing::info!("Loading model from: {}", path.display());

        let contents = std::fs::read_to_string(path)?;
        let file: ModelFile = serde_json::from_str(&contents)?;
        Self::from_model_file(file)
    }

    pub fn from_model_file(file: ModelFile) -> Result<Self, ModelError> {
        if file.layout_version.is_some() || file.layout_hash.is_some() {
            validate_layout(
                file.layout_version.unwrap_or(FEATURE_VERSION),
                file.layout_hash.unwrap_or_else(layout_hash),
            )?;
        }

        let stats = FeatureStats {
            means: to_table("means", file.means)?,
            stds: to_table("stds", file.stds)?,
        };
        let weights = ModelWeights {
            coefficients: to_table("coefficients", file.coefficients)?,
            intercept: file.intercept,
        };

        Self::new(file.name, stats, weights)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &FeatureStats {
        &self.stats
    }

    pub fn weights(&self) -> &ModelWeights {
        &self.weights
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn to_table(table: &'static str, values: Vec<f64>) -> Result<[f64; FEATURE_COUNT], ModelError> {
    let actual = values.len();
    values.try_into().map_err(|_| ModelError::TableLength {
        table,
        expected: FEATURE_COUNT,
        actual,
    })
}

fn check_finite(table: &'static str, values: &[f64]) -> Result<(), ModelError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ModelError::NonFinite { table, index }),
        None => Ok(()),
    }
}
