//! Mission: joins one scientist to one planet.

use super::validation::{non_empty_text, reference_id, Violations};
use crate::error::AppError;
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Mission {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
}

/// Validated mission fields. Whether the referenced rows exist is checked by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionDraft {
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
}

impl MissionDraft {
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        let mut v = Violations::default();
        let name = v.check(non_empty_text(body.get("name"), "Mission must have a name"));
        let scientist_id = v.check(reference_id(
            body.get("scientist_id"),
            "Mission must have a scientist_id",
        ));
        let planet_id = v.check(reference_id(body.get("planet_id"), "Mission must have a planet_id"));
        match (name, scientist_id, planet_id) {
            (Some(name), Some(scientist_id), Some(planet_id)) => Ok(MissionDraft {
                name,
                scientist_id,
                planet_id,
            }),
            _ => Err(v.into_error()),
        }
    }

    pub fn into_mission(self, id: i64) -> Mission {
        Mission {
            id,
            name: self.name,
            scientist_id: self.scientist_id,
            planet_id: self.planet_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(v: Value) -> Result<MissionDraft, AppError> {
        MissionDraft::from_body(v.as_object().unwrap())
    }

    #[test]
    fn zero_scientist_id_is_rejected() {
        match draft(json!({"name": "Voyager", "scientist_id": 0, "planet_id": 1})) {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors, vec!["Mission must have a scientist_id"])
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_planet_id_is_rejected() {
        assert!(draft(json!({"name": "Voyager", "scientist_id": 1})).is_err());
    }

    #[test]
    fn valid_draft() {
        let d = draft(json!({"name": "Voyager", "scientist_id": 2, "planet_id": 5})).unwrap();
        assert_eq!(d.into_mission(7), Mission {
            id: 7,
            name: "Voyager".into(),
            scientist_id: 2,
            planet_id: 5,
        });
    }
}
