//! Axum route handlers for the builder API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::builder::actions::DraftAction;
use crate::builder::session::{DownloadAck, Navigation, SessionSnapshot};
use crate::builder::steps::Step;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SelectTemplateRequest {
    pub template: String,
}

#[derive(Debug, Deserialize)]
pub struct GoToStepRequest {
    pub step: Step,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let snapshot = state.sessions.create().await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.snapshot(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/actions
///
/// Applies one draft edit. A rejected edit (duplicate skill, bad index)
/// leaves the draft exactly as it was.
pub async fn handle_dispatch_action(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(action): Json<DraftAction>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.dispatch(id, action).await?))
}

/// PUT /api/v1/sessions/:id/template
pub async fn handle_select_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectTemplateRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.select_template(id, &req.template).await?))
}

/// POST /api/v1/sessions/:id/step/next
pub async fn handle_next_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.navigate(id, Navigation::Next).await?))
}

/// POST /api/v1/sessions/:id/step/previous
pub async fn handle_previous_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.navigate(id, Navigation::Previous).await?))
}

/// PUT /api/v1/sessions/:id/step
pub async fn handle_go_to_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<GoToStepRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(
        state.sessions.navigate(id, Navigation::GoTo(req.step)).await?,
    ))
}

/// POST /api/v1/sessions/:id/save
pub async fn handle_save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.save(id).await?))
}

/// POST /api/v1/sessions/:id/download
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<DownloadAck>), AppError> {
    let ack = state.sessions.download(id).await?;
    Ok((StatusCode::ACCEPTED, Json(ack)))
}

/// POST /api/v1/sessions/:id/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.snapshot(id).await?;
    Err(AppError::NotImplemented("Upload option coming soon"))
}
