//! In-process store for local runs and tests. Each write holds the write lock for its whole
//! duration, so cascades and reference checks are atomic.

use super::Store;
use crate::error::AppError;
use crate::model::{
    Mission, MissionDetail, MissionDraft, Planet, PlanetDetail, PlanetDraft, Scientist,
    ScientistDetail, ScientistDraft, ScientistPatch,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    last_scientist_id: i64,
    last_planet_id: i64,
    last_mission_id: i64,
    scientists: BTreeMap<i64, Scientist>,
    planets: BTreeMap<i64, Planet>,
    missions: BTreeMap<i64, Mission>,
}

impl Tables {
    fn scientist_detail(&self, scientist: &Scientist) -> ScientistDetail {
        let missions: Vec<(Mission, Planet)> = self
            .missions
            .values()
            .filter(|m| m.scientist_id == scientist.id)
            .filter_map(|m| self.planets.get(&m.planet_id).map(|p| (m.clone(), p.clone())))
            .collect();
        ScientistDetail::new(scientist, &missions)
    }

    fn planet_detail(&self, planet: &Planet) -> PlanetDetail {
        let missions: Vec<(Mission, Scientist)> = self
            .missions
            .values()
            .filter(|m| m.planet_id == planet.id)
            .filter_map(|m| self.scientists.get(&m.scientist_id).map(|s| (m.clone(), s.clone())))
            .collect();
        PlanetDetail::new(planet, &missions)
    }

    fn mission_detail(&self, mission: &Mission) -> Option<MissionDetail> {
        let scientist = self.scientists.get(&mission.scientist_id)?;
        let planet = self.planets.get(&mission.planet_id)?;
        Some(MissionDetail::new(mission, scientist, planet))
    }
}

/// Ids are per table, start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn is_empty(&self) -> Result<bool, AppError> {
        let t = self.tables.read().await;
        Ok(t.scientists.is_empty() && t.planets.is_empty() && t.missions.is_empty())
    }

    async fn list_scientists(&self) -> Result<Vec<Scientist>, AppError> {
        Ok(self.tables.read().await.scientists.values().cloned().collect())
    }

    async fn scientist_exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.read().await.scientists.contains_key(&id))
    }

    async fn scientist_detail(&self, id: i64) -> Result<Option<ScientistDetail>, AppError> {
        let t = self.tables.read().await;
        Ok(t.scientists.get(&id).map(|s| t.scientist_detail(s)))
    }

    async fn create_scientist(&self, draft: ScientistDraft) -> Result<ScientistDetail, AppError> {
        let mut t = self.tables.write().await;
        t.last_scientist_id += 1;
        let scientist = draft.into_scientist(t.last_scientist_id);
        let detail = t.scientist_detail(&scientist);
        t.scientists.insert(scientist.id, scientist);
        Ok(detail)
    }

    async fn update_scientist(
        &self,
        id: i64,
        patch: &ScientistPatch,
    ) -> Result<Option<ScientistDetail>, AppError> {
        let mut t = self.tables.write().await;
        let Some(scientist) = t.scientists.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(scientist);
        let scientist = scientist.clone();
        Ok(Some(t.scientist_detail(&scientist)))
    }

    async fn delete_scientist(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        if t.scientists.remove(&id).is_none() {
            return Ok(false);
        }
        t.missions.retain(|_, m| m.scientist_id != id);
        Ok(true)
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        Ok(self.tables.read().await.planets.values().cloned().collect())
    }

    async fn planet_detail(&self, id: i64) -> Result<Option<PlanetDetail>, AppError> {
        let t = self.tables.read().await;
        Ok(t.planets.get(&id).map(|p| t.planet_detail(p)))
    }

    async fn create_planet(&self, draft: PlanetDraft) -> Result<Planet, AppError> {
        let mut t = self.tables.write().await;
        t.last_planet_id += 1;
        let planet = draft.into_planet(t.last_planet_id);
        t.planets.insert(planet.id, planet.clone());
        Ok(planet)
    }

    async fn delete_planet(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        if t.planets.remove(&id).is_none() {
            return Ok(false);
        }
        t.missions.retain(|_, m| m.planet_id != id);
        Ok(true)
    }

    async fn create_mission(&self, draft: MissionDraft) -> Result<MissionDetail, AppError> {
        let mut t = self.tables.write().await;
        if !t.scientists.contains_key(&draft.scientist_id) || !t.planets.contains_key(&draft.planet_id) {
            return Err(AppError::validation("referenced scientist or planet does not exist"));
        }
        t.last_mission_id += 1;
        let mission = draft.into_mission(t.last_mission_id);
        let detail = t
            .mission_detail(&mission)
            .ok_or_else(|| AppError::validation("referenced scientist or planet does not exist"))?;
        t.missions.insert(mission.id, mission);
        Ok(detail)
    }

    async fn mission_detail(&self, id: i64) -> Result<Option<MissionDetail>, AppError> {
        let t = self.tables.read().await;
        Ok(t.missions.get(&id).and_then(|m| t.mission_detail(m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> (MemoryStore, i64, i64) {
        let store = MemoryStore::new();
        let s = store
            .create_scientist(ScientistDraft {
                name: "Ada".into(),
                field_of_study: "Math".into(),
            })
            .await
            .unwrap();
        let p = store
            .create_planet(PlanetDraft {
                name: "Mars".into(),
                distance_from_earth: 225,
                nearest_star: "Sun".into(),
            })
            .await
            .unwrap();
        (store, s.id, p.id)
    }

    fn mission(name: &str, scientist_id: i64, planet_id: i64) -> MissionDraft {
        MissionDraft {
            name: name.into(),
            scientist_id,
            planet_id,
        }
    }

    #[tokio::test]
    async fn deleting_scientist_cascades_to_missions() {
        let (store, sid, pid) = seeded().await;
        let a = store.create_mission(mission("A", sid, pid)).await.unwrap();
        let b = store.create_mission(mission("B", sid, pid)).await.unwrap();
        assert_eq!(store.scientist_detail(sid).await.unwrap().unwrap().missions.len(), 2);

        assert!(store.delete_scientist(sid).await.unwrap());
        assert!(store.mission_detail(a.id).await.unwrap().is_none());
        assert!(store.mission_detail(b.id).await.unwrap().is_none());
        assert!(store.planet_detail(pid).await.unwrap().unwrap().missions.is_empty());
        assert!(!store.delete_scientist(sid).await.unwrap());
    }

    #[tokio::test]
    async fn deleting_planet_cascades_to_missions() {
        let (store, sid, pid) = seeded().await;
        let m = store.create_mission(mission("A", sid, pid)).await.unwrap();
        assert!(store.delete_planet(pid).await.unwrap());
        assert!(store.mission_detail(m.id).await.unwrap().is_none());
        assert!(store.scientist_detail(sid).await.unwrap().unwrap().missions.is_empty());
    }

    #[tokio::test]
    async fn mission_requires_existing_references() {
        let (store, sid, pid) = seeded().await;
        let err = store.create_mission(mission("A", sid, pid + 100)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = store.create_mission(mission("A", sid + 100, pid)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.scientist_detail(sid).await.unwrap().unwrap().missions.is_empty());
    }

    #[tokio::test]
    async fn update_applies_patch_only_to_present_fields() {
        let (store, sid, _) = seeded().await;
        let patch = ScientistPatch {
            name: None,
            field_of_study: Some("Physics".into()),
        };
        let d = store.update_scientist(sid, &patch).await.unwrap().unwrap();
        assert_eq!(d.name, "Ada");
        assert_eq!(d.field_of_study, "Physics");
        assert!(store.update_scientist(sid + 100, &patch).await.unwrap().is_none());
        assert!(store.scientist_exists(sid).await.unwrap());
        assert!(!store.scientist_exists(sid + 100).await.unwrap());
    }

    #[tokio::test]
    async fn empty_reports_contents() {
        assert!(MemoryStore::new().is_empty().await.unwrap());
        let (store, _, _) = seeded().await;
        assert!(!store.is_empty().await.unwrap());
    }
}
