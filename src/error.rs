//! Error handling

use std::path::PathBuf;

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Artifact errors
    #[error("artifact {} is missing or malformed: {reason}", .path.display())]
    MissingArtifact { path: PathBuf, reason: String },

    // Validation errors
    #[error("top_n must be between {min} and {max}, got {n}")]
    InvalidN { n: i64, min: u32, max: u32 },

    #[error("{0}")]
    ValidationError(String),

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // Generic errors
    #[error("internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn missing_artifact(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        AppError::MissingArtifact {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::MissingArtifact { .. } => {
                tracing::error!("Artifact error: {}", self);
                (StatusCode::SERVICE_UNAVAILABLE, "Report artifacts are unavailable".to_string())
            }
            AppError::InvalidN { .. } => {
                tracing::warn!("Rejected request: {}", self);
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
