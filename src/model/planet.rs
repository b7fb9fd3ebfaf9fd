//! Planet record and its validated draft.

use super::validation::{integer, non_empty_text, Violations};
use crate::error::AppError;
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub distance_from_earth: i64,
    pub nearest_star: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanetDraft {
    pub name: String,
    pub distance_from_earth: i64,
    pub nearest_star: String,
}

impl PlanetDraft {
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        let mut v = Violations::default();
        let name = v.check(non_empty_text(body.get("name"), "Planet must have a name"));
        let distance = v.check(integer(
            body.get("distance_from_earth"),
            "Planet must have an integer distance_from_earth",
        ));
        let star = v.check(non_empty_text(
            body.get("nearest_star"),
            "Planet must have a nearest star",
        ));
        match (name, distance, star) {
            (Some(name), Some(distance_from_earth), Some(nearest_star)) => Ok(PlanetDraft {
                name,
                distance_from_earth,
                nearest_star,
            }),
            _ => Err(v.into_error()),
        }
    }

    pub fn into_planet(self, id: i64) -> Planet {
        Planet {
            id,
            name: self.name,
            distance_from_earth: self.distance_from_earth,
            nearest_star: self.nearest_star,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_validates_every_field() {
        let body = json!({"name": "Mars", "distance_from_earth": 225, "nearest_star": "Sun"});
        let d = PlanetDraft::from_body(body.as_object().unwrap()).unwrap();
        assert_eq!(d.into_planet(3).distance_from_earth, 225);

        let bad = json!({"name": "", "distance_from_earth": "far"});
        match PlanetDraft::from_body(bad.as_object().unwrap()) {
            Err(AppError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected {other:?}"),
        }
    }
}
