//! Planet handlers.

use crate::error::AppError;
use crate::model::PlanetSummary;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let planets = state.store.list_planets().await?;
    let body: Vec<PlanetSummary> = planets.iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(body)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state
        .store
        .planet_detail(id)
        .await?
        .ok_or(AppError::NotFound("Planet"))?;
    Ok((StatusCode::OK, Json(detail)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.delete_planet(id).await? {
        return Err(AppError::NotFound("Planet"));
    }
    tracing::info!(id, "planet deleted");
    Ok(StatusCode::NO_CONTENT)
}
