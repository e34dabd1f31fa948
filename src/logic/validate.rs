//! Input validation
//!
//! Turns an untrusted JSON value into a [`FeatureVector`]. Every element goes
//! through an explicit parse-or-fail step; nothing downstream re-checks.

use serde_json::Value;
use thiserror::Error;

use super::layout::{feature_name, FEATURE_COUNT};

/// Exactly [`FEATURE_COUNT`] finite values, in layout order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Build from raw values, rejecting any non-finite element.
    pub fn new(values: [f64; FEATURE_COUNT]) -> Result<Self, ValidationError> {
        match values.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(ValidationError::invalid_feature(index, CoercionFailure::NonFinite)),
            None => Ok(Self(values)),
        }
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Features array is required")]
    Missing,

    #[error("Expected {expected} features, received {received}")]
    WrongLength { expected: usize, received: usize },

    #[error("Feature at index {index} ({name}) is not a valid number")]
    InvalidFeature {
        index: usize,
        name: &'static str,
        reason: CoercionFailure,
    },
}

impl ValidationError {
    fn invalid_feature(index: usize, reason: CoercionFailure) -> Self {
        ValidationError::InvalidFeature {
            index,
            name: feature_name(index).unwrap_or("unknown"),
            reason,
        }
    }
}

/// Why a single element could not be read as a number.
/// Logged server-side; the client message stays generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoercionFailure {
    #[error("not a number or numeric string")]
    NotNumeric,

    #[error("string does not parse as a number")]
    Unparseable,

    #[error("value is not finite")]
    NonFinite,
}

/// Read one element as a finite `f64`.
///
/// Numbers are taken as-is and strings are parsed in full after trimming.
/// Everything else fails. Number literals beyond `f64` range (`1e400`) are
/// kept verbatim by the JSON reader and end up here as infinities.
pub fn coerce_feature(value: &Value) -> Result<f64, CoercionFailure> {
    let parsed = match value {
        Value::Number(n) => n
            .as_f64()
            .or_else(|| n.to_string().parse::<f64>().ok())
            .ok_or(CoercionFailure::NotNumeric)?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CoercionFailure::Unparseable)?,
        _ => return Err(CoercionFailure::NotNumeric),
    };

    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(CoercionFailure::NonFinite)
    }
}

/// Validate the `features` member of a request body.
///
/// `None` means the member was absent. The first bad element is reported.
pub fn validate_features(input: Option<&Value>) -> Result<FeatureVector, ValidationError> {
    let items = match input {
        Some(Value::Array(items)) => items,
        _ => return Err(ValidationError::Missing),
    };

    if items.len() != FEATURE_COUNT {
        return Err(ValidationError::WrongLength {
            expected: FEATURE_COUNT,
            received: items.len(),
        });
    }

    let mut values = [0.0f64; FEATURE_COUNT];
    for (index, item) in items.iter().enumerate() {
        values[index] = coerce_feature(item).map_err(|reason| {
            tracing::warn!(index, %reason, "Feature rejected");
            ValidationError::invalid_feature(index, reason)
        })?;
    }

    Ok(FeatureVector(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_array() -> Value {
        Value::Array((0..FEATURE_COUNT).map(|i| json!(i as f64 + 0.5)).collect())
    }

    #[test]
    fn test_missing_features() {
        assert_eq!(validate_features(None), Err(ValidationError::Missing));
        assert_eq!(validate_features(Some(&Value::Null)), Err(ValidationError::Missing));
        assert_eq!(validate_features(Some(&json!("1,2,3"))), Err(ValidationError::Missing));
        assert_eq!(validate_features(Some(&json!({"0": 1}))), Err(ValidationError::Missing));
        assert_eq!(ValidationError::Missing.to_string(), "Features array is required");
    }

    #[test]
    fn test_wrong_length() {
        for len in [0usize, 1, 29, 31, 60] {
            let input = Value::Array(vec![json!(1.0); len]);
            let err = validate_features(Some(&input)).unwrap_err();
            assert_eq!(err, ValidationError::WrongLength { expected: 30, received: len });
        }

        let input = Value::Array(vec![json!(1.0); 29]);
        let err = validate_features(Some(&input)).unwrap_err();
        assert_eq!(err.to_string(), "Expected 30 features, received 29");
    }

    #[test]
    fn test_invalid_feature_named_by_position() {
        let mut input = valid_array();
        input[4] = json!("abc");

        let err = validate_features(Some(&input)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFeature {
                index: 4,
                name: "mean smoothness",
                reason: CoercionFailure::Unparseable,
            }
        );
        assert_eq!(err.to_string(), "Feature at index 4 (mean smoothness) is not a valid number");
    }

    #[test]
    fn test_every_position_reports_its_name() {
        for index in 0..FEATURE_COUNT {
            let mut input = valid_array();
            input[index] = Value::Null;
            match validate_features(Some(&input)) {
                Err(ValidationError::InvalidFeature { index: i, name, reason }) => {
                    assert_eq!(i, index);
                    assert_eq!(Some(name), feature_name(index));
                    assert_eq!(reason, CoercionFailure::NotNumeric);
                }
                other => panic!("expected invalid feature at {}, got {:?}", index, other),
            }
        }
    }

    #[test]
    fn test_first_bad_element_reported() {
        let mut input = valid_array();
        input[7] = json!(true);
        input[2] = json!([]);

        let err = validate_features(Some(&input)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFeature {
                index: 2,
                name: "mean perimeter",
                reason: CoercionFailure::NotNumeric,
            }
        );
    }

    #[test]
    fn test_coerce_feature() {
        assert_eq!(coerce_feature(&json!(13.54)), Ok(13.54));
        assert_eq!(coerce_feature(&json!(-2)), Ok(-2.0));
        assert_eq!(coerce_feature(&json!("0.09779")), Ok(0.09779));
        assert_eq!(coerce_feature(&json!(" 1e3 ")), Ok(1000.0));
        assert_eq!(coerce_feature(&json!("abc")), Err(CoercionFailure::Unparseable));
        assert_eq!(coerce_feature(&json!("12abc")), Err(CoercionFailure::Unparseable));
        assert_eq!(coerce_feature(&json!("")), Err(CoercionFailure::Unparseable));
        assert_eq!(coerce_feature(&json!("NaN")), Err(CoercionFailure::NonFinite));
        assert_eq!(coerce_feature(&json!("inf")), Err(CoercionFailure::NonFinite));
        assert_eq!(coerce_feature(&json!(null)), Err(CoercionFailure::NotNumeric));
        assert_eq!(coerce_feature(&json!(false)), Err(CoercionFailure::NotNumeric));
        assert_eq!(coerce_feature(&json!({})), Err(CoercionFailure::NotNumeric));
    }

    #[test]
    fn test_valid_input_preserves_order() {
        let mut input = valid_array();
        input[10] = json!("42.25");

        let vector = validate_features(Some(&input)).unwrap();
        assert_eq!(vector.get(0), Some(0.5));
        assert_eq!(vector.get(10), Some(42.25));
        assert_eq!(vector.get(29), Some(29.5));
        assert_eq!(vector.get(30), None);
    }

    #[test]
    fn test_feature_vector_new_rejects_non_finite() {
        let mut values = [1.0; FEATURE_COUNT];
        assert!(FeatureVector::new(values).is_ok());

        values[23] = f64::INFINITY;
        assert_eq!(
            FeatureVector::new(values),
            Err(ValidationError::InvalidFeature {
                index: 23,
                name: "worst area",
                reason: CoercionFailure::NonFinite,
            })
        );
    }

    #[test]
    fn test_out_of_range_literal_is_invalid_feature() {
        let body = format!(
            "[{}]",
            (0..FEATURE_COUNT)
                .map(|i| if i == 3 { "1e400".to_string() } else { format!("{}.5", i) })
                .collect::<Vec<_>>()
                .join(",")
        );
        let input: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(coerce_feature(&input[3]), Err(CoercionFailure::NonFinite));
        let err = validate_features(Some(&input)).unwrap_err();
        assert_eq!(err.to_string(), "Feature at index 3 (mean area) is not a valid number");
        assert!(matches!(
            err,
            ValidationError::InvalidFeature { index: 3, reason: CoercionFailure::NonFinite, .. }
        ));
    }

    #[test]
    fn test_failure_reasons_are_loggable() {
        assert_eq!(CoercionFailure::Unparseable.to_string(), "string does not parse as a number");
        assert_eq!(CoercionFailure::NonFinite.to_string(), "value is not finite");
    }
}
