//! Prediction request/response models

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::layout::{feature_description, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
use crate::logic::{Label, LinearModel, Prediction, Probabilities, RiskLevel};

/// Request body. `features` stays untyped until validation so that shape and
/// element errors can be reported precisely.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub features: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub prediction: Label,
    pub confidence: f64,
    pub probabilities: Probabilities,
    pub risk_level: RiskLevel,
    pub timestamp: String,
}

impl From<Prediction> for PredictionResponse {
    fn from(p: Prediction) -> Self {
        Self {
            prediction: p.label,
            confidence: p.confidence,
            probabilities: p.probabilities,
            risk_level: p.risk_level,
            timestamp: iso_timestamp(p.timestamp),
        }
    }
}

/// ISO-8601 with millisecond precision, e.g. `2026-10-18T09:30:00.123Z`
pub fn iso_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ============================================================================
// SERVICE METADATA
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ExpectedInput {
    pub features: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub name: String,
    pub loaded_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub message: &'static str,
    pub endpoint: &'static str,
    pub method: &'static str,
    pub expected_input: ExpectedInput,
    pub feature_names: Vec<&'static str>,
    pub feature_count: usize,
    pub feature_descriptions: BTreeMap<&'static str, &'static str>,
    pub layout_version: u8,
    pub layout_hash: u32,
    pub model: ModelSummary,
}

impl ServiceInfo {
    pub fn describe(model: &LinearModel) -> Self {
        Self {
            message: "Breast Cancer Prediction API",
            endpoint: "/api/predict",
            method: "POST",
            expected_input: ExpectedInput {
                features: format!(
                    "Array of {} numerical values representing cell measurements",
                    FEATURE_COUNT
                ),
            },
            feature_names: FEATURE_LAYOUT.to_vec(),
            feature_count: FEATURE_COUNT,
            feature_descriptions: FEATURE_LAYOUT
                .iter()
                .filter_map(|&name| feature_description(name).map(|d| (name, d)))
                .collect(),
            layout_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            model: ModelSummary {
                name: model.name().to_string(),
                loaded_at: iso_timestamp(model.loaded_at()),
            },
        }
    }
}
