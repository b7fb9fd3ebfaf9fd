//! Seed data loaded from a JSON file at startup.
//!
//! ```json
//! {
//!   "scientists": [{"name": "Ada", "field_of_study": "Math"}],
//!   "planets": [{"name": "Mars", "distance_from_earth": 225, "nearest_star": "Sun"}],
//!   "missions": [{"name": "Voyager", "scientist_id": 1, "planet_id": 1}]
//! }
//! ```
//!
//! Mission references are 1-based positions in the `scientists` and `planets` arrays of the
//! same file, not store ids. Every record goes through the same validation as the API.

use crate::error::{AppError, ConfigError};
use crate::model::{MissionDraft, PlanetDraft, ScientistDraft};
use crate::store::Store;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub scientists: Vec<Map<String, Value>>,
    #[serde(default)]
    pub planets: Vec<Map<String, Value>>,
    #[serde(default)]
    pub missions: Vec<Map<String, Value>>,
}

pub async fn load_seed(path: &str) -> Result<SeedFile, ConfigError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| ConfigError::Seed {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Seed {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Inserts the seed into an empty store. Returns false, inserting nothing, when the store has data.
pub async fn apply_seed(store: &dyn Store, seed: &SeedFile) -> Result<bool, AppError> {
    if !store.is_empty().await? {
        return Ok(false);
    }

    let mut scientist_ids = Vec::with_capacity(seed.scientists.len());
    for body in &seed.scientists {
        let created = store.create_scientist(ScientistDraft::from_body(body)?).await?;
        scientist_ids.push(created.id);
    }
    let mut planet_ids = Vec::with_capacity(seed.planets.len());
    for body in &seed.planets {
        let created = store.create_planet(PlanetDraft::from_body(body)?).await?;
        planet_ids.push(created.id);
    }
    for body in &seed.missions {
        let mut draft = MissionDraft::from_body(body)?;
        draft.scientist_id = resolve_position(&scientist_ids, draft.scientist_id, "scientist_id")?;
        draft.planet_id = resolve_position(&planet_ids, draft.planet_id, "planet_id")?;
        store.create_mission(draft).await?;
    }

    tracing::info!(
        scientists = scientist_ids.len(),
        planets = planet_ids.len(),
        missions = seed.missions.len(),
        "seed applied"
    );
    Ok(true)
}

fn resolve_position(ids: &[i64], position: i64, field: &str) -> Result<i64, AppError> {
    position
        .checked_sub(1)
        .and_then(|p| usize::try_from(p).ok())
        .and_then(|i| ids.get(i).copied())
        .ok_or_else(|| AppError::validation(format!("seed mission {} {} is out of range", field, position)))
}
