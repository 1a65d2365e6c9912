use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::models::AnalysisError;
use crate::builder::draft::BuilderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Capacity exceeded: {0}")]
    Capacity(String),

    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("{0}")]
    NotImplemented(&'static str),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Capacity(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CAPACITY_EXCEEDED",
                msg.clone(),
            ),
            AppError::Builder(BuilderError::DuplicateSkill(_)) => {
                (StatusCode::CONFLICT, "DUPLICATE_SKILL", self.to_string())
            }
            AppError::Builder(BuilderError::DuplicateSkillId(_)) => {
                (StatusCode::CONFLICT, "DUPLICATE_SKILL_ID", self.to_string())
            }
            AppError::Builder(BuilderError::OutOfRange { .. }) => {
                (StatusCode::BAD_REQUEST, "OUT_OF_RANGE", self.to_string())
            }
            AppError::Analysis(AnalysisError::EmptyInput(_)) => {
                (StatusCode::BAD_REQUEST, "EMPTY_INPUT", self.to_string())
            }
            AppError::Analysis(AnalysisError::InFlight) => {
                (StatusCode::CONFLICT, "ANALYSIS_IN_FLIGHT", self.to_string())
            }
            AppError::Analysis(AnalysisError::Superseded) => {
                (StatusCode::CONFLICT, "ANALYSIS_SUPERSEDED", self.to_string())
            }
            AppError::Analysis(AnalysisError::Failed { mode, detail }) => {
                tracing::error!(%mode, "Analysis error: {detail}");
                (StatusCode::BAD_GATEWAY, "ANALYSIS_FAILED", self.to_string())
            }
            AppError::NotImplemented(msg) => {
                (StatusCode::NOT_IMPLEMENTED, "NOT_IMPLEMENTED", msg.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
