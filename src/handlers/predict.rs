//! Prediction handlers

use axum::{extract::{rejection::JsonRejection, State}, Json};

use crate::{AppState, AppResult};
use crate::logic::validate_features;
use crate::models::{PredictRequest, PredictionResponse, ServiceInfo};

/// Score a feature vector
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let Json(req) = payload?;

    let features = validate_features(req.features.as_ref())?;
    let prediction = state.model.predict(&features)?;

    tracing::debug!(
        "Prediction: {:?} (confidence {:.2}%)",
        prediction.label,
        prediction.confidence
    );

    Ok(Json(prediction.into()))
}

/// Static service metadata
pub async fn info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo::describe(&state.model))
}
