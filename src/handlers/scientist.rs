//! Scientist handlers: list, create, read, patch, delete.

use crate::error::AppError;
use crate::model::validation::body_to_map;
use crate::model::{ScientistDraft, ScientistPatch, ScientistSummary};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let scientists = state.store.list_scientists().await?;
    let body: Vec<ScientistSummary> = scientists.iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(body)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let draft = ScientistDraft::from_body(&body_to_map(body)?)?;
    let detail = state.store.create_scientist(draft).await?;
    tracing::info!(id = detail.id, "scientist created");
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state
        .store
        .scientist_detail(id)
        .await?
        .ok_or(AppError::NotFound("Scientist"))?;
    Ok((StatusCode::OK, Json(detail)))
}

/// Only keys present in the body are reassigned. The scientist must exist before the body is judged.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.scientist_exists(id).await? {
        return Err(AppError::NotFound("Scientist"));
    }
    let patch = ScientistPatch::from_body(&body_to_map(body)?)?;
    let detail = state
        .store
        .update_scientist(id, &patch)
        .await?
        .ok_or(AppError::NotFound("Scientist"))?;
    tracing::info!(id, "scientist updated");
    Ok((StatusCode::ACCEPTED, Json(detail)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.delete_scientist(id).await? {
        return Err(AppError::NotFound("Scientist"));
    }
    tracing::info!(id, "scientist deleted");
    Ok(StatusCode::NO_CONTENT)
}
