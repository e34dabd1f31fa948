//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the input schema**
//!
//! Normalization statistics and coefficients are indexed positionally, so
//! position `i` must always mean the same measurement.
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION

use crc32fast::Hasher;
use thiserror::Error;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

/// Total number of features
pub const FEATURE_COUNT: usize = 30;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in the exact order they appear in the vector
pub const FEATURE_LAYOUT: [&str; FEATURE_COUNT] = [
    // === Mean values (0-9) ===
    "mean radius",
    "mean texture",
    "mean perimeter",
    "mean area",
    "mean smoothness",
    "mean compactness",
    "mean concavity",
    "mean concave points",
    "mean symmetry",
    "mean fractal dimension",

    // === Standard errors (10-19) ===
    "radius error",
    "texture error",
    "perimeter error",
    "area error",
    "smoothness error",
    "compactness error",
    "concavity error",
    "concave points error",
    "symmetry error",
    "fractal dimension error",

    // === Worst values (20-29) ===
    "worst radius",
    "worst texture",
    "worst perimeter",
    "worst area",
    "worst smoothness",
    "worst compactness",
    "worst concavity",
    "worst concave points",
    "worst symmetry",
    "worst fractal dimension",
];

/// Human descriptions, used to label form inputs.
/// Only the mean measurements carry one.
pub const FEATURE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("mean radius", "Mean of distances from center to points on the perimeter"),
    ("mean texture", "Standard deviation of gray-scale values"),
    ("mean perimeter", "Mean size of the core tumor"),
    ("mean area", "Mean area of the core tumor"),
    ("mean smoothness", "Mean of local variation in radius lengths"),
    ("mean compactness", "Mean of perimeter^2 / area - 1.0"),
    ("mean concavity", "Mean of severity of concave portions of the contour"),
    ("mean concave points", "Mean for number of concave portions of the contour"),
    ("mean symmetry", "Mean symmetry of the tumor"),
    ("mean fractal dimension", "Mean for \"coastline approximation\" - 1"),
];

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 of the layout version and the ordered feature names.
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

#[derive(Debug, Clone, Error)]
#[error("Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), got v{actual_version} (hash: {actual_hash:08x})")]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that externally supplied tables were built for this layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE LOOKUP
// ============================================================================

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

/// Get the description for a feature, if it has one
pub fn feature_description(name: &str) -> Option<&'static str> {
    FEATURE_DESCRIPTIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, d)| *d)
}
