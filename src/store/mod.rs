//! Persistence seam. Every write is atomic: it either fully applies or leaves nothing behind.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{
    MissionDetail, MissionDraft, Planet, PlanetDetail, PlanetDraft, Scientist, ScientistDetail,
    ScientistDraft, ScientistPatch,
};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round trip used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;

    /// True when no scientists, planets or missions exist.
    async fn is_empty(&self) -> Result<bool, AppError>;

    async fn list_scientists(&self) -> Result<Vec<Scientist>, AppError>;

    /// Primary-key lookup without loading missions.
    async fn scientist_exists(&self, id: i64) -> Result<bool, AppError>;

    async fn scientist_detail(&self, id: i64) -> Result<Option<ScientistDetail>, AppError>;

    async fn create_scientist(&self, draft: ScientistDraft) -> Result<ScientistDetail, AppError>;

    /// Applies the patch to the stored row. `None` when the scientist does not exist.
    async fn update_scientist(
        &self,
        id: i64,
        patch: &ScientistPatch,
    ) -> Result<Option<ScientistDetail>, AppError>;

    /// Deletes the scientist and its missions. Returns false when it did not exist.
    async fn delete_scientist(&self, id: i64) -> Result<bool, AppError>;

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError>;

    async fn planet_detail(&self, id: i64) -> Result<Option<PlanetDetail>, AppError>;

    async fn create_planet(&self, draft: PlanetDraft) -> Result<Planet, AppError>;

    /// Deletes the planet and its missions. Returns false when it did not exist.
    async fn delete_planet(&self, id: i64) -> Result<bool, AppError>;

    /// Fails with a validation error when the scientist or planet does not exist.
    async fn create_mission(&self, draft: MissionDraft) -> Result<MissionDetail, AppError>;

    async fn mission_detail(&self, id: i64) -> Result<Option<MissionDetail>, AppError>;
}
