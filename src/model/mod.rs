//! Entities, validated drafts/patches, and response projections.

mod mission;
mod planet;
pub mod projection;
mod scientist;
pub mod validation;

pub use mission::{Mission, MissionDraft};
pub use planet::{Planet, PlanetDraft};
pub use projection::*;
pub use scientist::{Scientist, ScientistDraft, ScientistPatch};
