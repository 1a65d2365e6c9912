//! Axum route handlers for resume analysis.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::models::{AnalysisMode, AnalysisResult};
use crate::analysis::tracker::AnalysisStatus;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    pub mode: AnalysisMode,
}

/// POST /api/v1/sessions/:id/analysis
///
/// Rejects blank text without calling the analyzer, and rejects a second
/// request while one is still outstanding for the session.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state
        .sessions
        .run_analysis(id, state.analyzer.as_ref(), &req.text, req.mode)
        .await?;
    Ok(Json(result))
}

/// GET /api/v1/sessions/:id/analysis
pub async fn handle_analysis_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisStatus>, AppError> {
    Ok(Json(state.sessions.analysis_status(id).await?))
}
