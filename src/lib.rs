//! Cytoscore - cell-measurement scoring service
//!
//! Classifies a vector of 30 breast cell-nucleus measurements as benign or
//! malignant with a fixed logistic-regression model.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        CYTOSCORE                          │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌────────────┐   ┌───────────────────┐  │
//! │  │  API       │──▶│ Validator  │──▶│  Scorer           │  │
//! │  │  (Axum)    │   │ (30 × f64) │   │  z-score→σ→label  │  │
//! │  └────────────┘   └────────────┘   └─────────┬─────────┘  │
//! │                                              ▼            │
//! │                                   ┌───────────────────┐   │
//! │                                   │ LinearModel (Arc) │   │
//! │                                   └───────────────────┘   │
//! └───────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderValue,
    routing::get,
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};
use logic::{LinearModel, ModelError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<LinearModel>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(model: LinearModel, config: config::Config) -> Self {
        Self {
            model: Arc::new(model),
            config,
        }
    }

    /// Load the model named by the configuration, or the built-in one
    pub fn from_config(config: config::Config) -> Result<Self, ModelError> {
        let model = match &config.model_path {
            Some(path) => LinearModel::from_file(path)?,
            None => LinearModel::builtin()?,
        };

        tracing::info!("Model ready: {}", model.name());
        Ok(Self::new(model, config))
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(handlers::health::check))
        .route(
            "/api/predict",
            get(handlers::predict::info).post(handlers::predict::predict),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &config::Config) -> CorsLayer {
    if !config.is_production() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    match config.cors_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Some(Err(e)) => {
            tracing::warn!("Ignoring invalid CORS_ORIGIN: {}", e);
            CorsLayer::new()
        }
        None => CorsLayer::new(),
    }
}
