//! Mission handlers.

use crate::error::AppError;
use crate::model::validation::body_to_map;
use crate::model::MissionDraft;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let draft = MissionDraft::from_body(&body_to_map(body)?)?;
    let detail = state.store.create_mission(draft).await?;
    tracing::info!(
        id = detail.id,
        scientist_id = detail.scientist_id,
        planet_id = detail.planet_id,
        "mission created"
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state
        .store
        .mission_detail(id)
        .await?
        .ok_or(AppError::NotFound("Mission"))?;
    Ok((StatusCode::OK, Json(detail)))
}
