use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct WelcomeResponse {
    status: &'static str,
    message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    experiment: ExperimentStatus,
}

#[derive(Serialize)]
pub struct ExperimentStatus {
    enabled: bool,
    model_a: String,
    model_b: String,
    model_b_traffic_percentage: u8,
}

/// Root endpoint
pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        status: "ok",
        message: "Welcome to the LAWYER AI API",
    })
}

/// Health check endpoint
///
/// Reports liveness and the active model routing configuration.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    let config = state.pipeline.router().config();

    Json(HealthResponse {
        status: "healthy",
        experiment: ExperimentStatus {
            enabled: config.enabled,
            model_a: config.model_a.clone(),
            model_b: config.model_b.clone(),
            model_b_traffic_percentage: config.model_b_traffic_percentage,
        },
    })
}
