//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::artifacts::ArtifactFingerprint;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    customers: usize,
    features: usize,
    attribution_rows: usize,
    loaded_at: i64,
    artifacts: [ArtifactFingerprint; 2],
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let artifacts = &state.artifacts;
    Json(HealthResponse {
        status: "healthy",
        version: crate::constants::APP_VERSION,
        timestamp: chrono::Utc::now().timestamp(),
        customers: artifacts.dataset.len(),
        features: artifacts.attribution.feature_names.len(),
        attribution_rows: artifacts.attribution.rows(),
        loaded_at: artifacts.loaded_at.timestamp(),
        artifacts: [
            artifacts.report_fingerprint.clone(),
            artifacts.attribution_fingerprint.clone(),
        ],
    })
}
