//! Response shapes. Nested records never carry a back-reference to the record they are nested under.

use super::{Mission, Planet, Scientist};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScientistSummary {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
}

impl From<&Scientist> for ScientistSummary {
    fn from(s: &Scientist) -> Self {
        ScientistSummary {
            id: s.id,
            name: s.name.clone(),
            field_of_study: s.field_of_study.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlanetSummary {
    pub id: i64,
    pub name: String,
    pub distance_from_earth: i64,
    pub nearest_star: String,
}

impl From<&Planet> for PlanetSummary {
    fn from(p: &Planet) -> Self {
        PlanetSummary {
            id: p.id,
            name: p.name.clone(),
            distance_from_earth: p.distance_from_earth,
            nearest_star: p.nearest_star.clone(),
        }
    }
}

/// A mission nested under its scientist: carries the planet, not the scientist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MissionInScientist {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub planet: PlanetSummary,
}

/// A mission nested under its planet: carries the scientist, not the planet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MissionInPlanet {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub scientist: ScientistSummary,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScientistDetail {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
    pub missions: Vec<MissionInScientist>,
}

impl ScientistDetail {
    pub fn new(scientist: &Scientist, missions: &[(Mission, Planet)]) -> Self {
        ScientistDetail {
            id: scientist.id,
            name: scientist.name.clone(),
            field_of_study: scientist.field_of_study.clone(),
            missions: missions
                .iter()
                .map(|(m, p)| MissionInScientist {
                    id: m.id,
                    name: m.name.clone(),
                    scientist_id: m.scientist_id,
                    planet_id: m.planet_id,
                    planet: p.into(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlanetDetail {
    pub id: i64,
    pub name: String,
    pub distance_from_earth: i64,
    pub nearest_star: String,
    pub missions: Vec<MissionInPlanet>,
}

impl PlanetDetail {
    pub fn new(planet: &Planet, missions: &[(Mission, Scientist)]) -> Self {
        PlanetDetail {
            id: planet.id,
            name: planet.name.clone(),
            distance_from_earth: planet.distance_from_earth,
            nearest_star: planet.nearest_star.clone(),
            missions: missions
                .iter()
                .map(|(m, s)| MissionInPlanet {
                    id: m.id,
                    name: m.name.clone(),
                    scientist_id: m.scientist_id,
                    planet_id: m.planet_id,
                    scientist: s.into(),
                })
                .collect(),
        }
    }
}

/// A mission on its own: both ends as summaries, neither with missions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MissionDetail {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub scientist: ScientistSummary,
    pub planet: PlanetSummary,
}

impl MissionDetail {
    pub fn new(mission: &Mission, scientist: &Scientist, planet: &Planet) -> Self {
        MissionDetail {
            id: mission.id,
            name: mission.name.clone(),
            scientist_id: mission.scientist_id,
            planet_id: mission.planet_id,
            scientist: scientist.into(),
            planet: planet.into(),
        }
    }
}
