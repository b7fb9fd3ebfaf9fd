//! Scientist record, its validated draft and its allow-listed patch.

use super::validation::{non_empty_text, Violations};
use crate::error::AppError;
use serde_json::{Map, Value};

const NAME_REQUIRED: &str = "Scientist must have a name";
const FIELD_REQUIRED: &str = "Scientist must have a field of study";

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Scientist {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
}

/// Fields of a scientist that does not exist yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScientistDraft {
    pub name: String,
    pub field_of_study: String,
}

impl ScientistDraft {
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        let mut v = Violations::default();
        let name = v.check(non_empty_text(body.get("name"), NAME_REQUIRED));
        let field_of_study = v.check(non_empty_text(body.get("field_of_study"), FIELD_REQUIRED));
        match (name, field_of_study) {
            (Some(name), Some(field_of_study)) => Ok(ScientistDraft {
                name,
                field_of_study,
            }),
            _ => Err(v.into_error()),
        }
    }

    pub fn into_scientist(self, id: i64) -> Scientist {
        Scientist {
            id,
            name: self.name,
            field_of_study: self.field_of_study,
        }
    }
}

/// Partial update. Only `name` and `field_of_study` may change; absent keys keep their value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScientistPatch {
    pub name: Option<String>,
    pub field_of_study: Option<String>,
}

impl ScientistPatch {
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        let mut v = Violations::default();
        let mut patch = ScientistPatch::default();
        for (key, value) in body {
            match key.as_str() {
                "name" => patch.name = v.check(non_empty_text(Some(value), NAME_REQUIRED)),
                "field_of_study" => {
                    patch.field_of_study = v.check(non_empty_text(Some(value), FIELD_REQUIRED))
                }
                other => v.push(format!("{} cannot be updated", other)),
            }
        }
        if v.is_empty() {
            Ok(patch)
        } else {
            Err(v.into_error())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.field_of_study.is_none()
    }

    pub fn apply(&self, scientist: &mut Scientist) {
        if let Some(name) = &self.name {
            scientist.name = name.clone();
        }
        if let Some(field_of_study) = &self.field_of_study {
            scientist.field_of_study = field_of_study.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::validation::body_to_map;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        body_to_map(v).unwrap()
    }

    #[test]
    fn draft_requires_both_fields() {
        let d = ScientistDraft::from_body(&map(json!({"name": "Ada", "field_of_study": "Math"}))).unwrap();
        assert_eq!(d.name, "Ada");
        assert_eq!(d.field_of_study, "Math");

        match ScientistDraft::from_body(&map(json!({"name": "", "field_of_study": ""}))) {
            Err(AppError::Validation(errors)) => assert_eq!(errors, vec![NAME_REQUIRED, FIELD_REQUIRED]),
            other => panic!("unexpected {other:?}"),
        }
        assert!(ScientistDraft::from_body(&map(json!({"name": "Ada"}))).is_err());
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let patch = ScientistPatch::from_body(&map(json!({"field_of_study": "Physics"}))).unwrap();
        let mut s = Scientist {
            id: 1,
            name: "Ada".into(),
            field_of_study: "Math".into(),
        };
        patch.apply(&mut s);
        assert_eq!(s.name, "Ada");
        assert_eq!(s.field_of_study, "Physics");
        assert_eq!(s.id, 1);
    }

    #[test]
    fn patch_revalidates_present_fields() {
        assert!(ScientistPatch::from_body(&map(json!({"name": ""}))).is_err());
        assert!(ScientistPatch::from_body(&map(json!({"name": null}))).is_err());
    }

    #[test]
    fn patch_rejects_fields_outside_allow_list() {
        match ScientistPatch::from_body(&map(json!({"id": 9, "name": "Grace"}))) {
            Err(AppError::Validation(errors)) => assert_eq!(errors, vec!["id cannot be updated"]),
            other => panic!("unexpected {other:?}"),
        }
        assert!(ScientistPatch::from_body(&map(json!({"missions": []}))).is_err());
    }

    #[test]
    fn empty_patch_is_allowed() {
        assert!(ScientistPatch::from_body(&Map::new()).unwrap().is_empty());
    }
}
