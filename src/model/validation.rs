//! Field validators shared by drafts and patches.
//!
//! Each validator takes the raw JSON value of one field (or `None` when the key is absent)
//! and returns the typed value or the message to report.

use crate::error::AppError;
use serde_json::{Map, Value};

/// Non-empty string. Absent, null, non-string and `""` all fail.
pub fn non_empty_text(value: Option<&Value>, message: &str) -> Result<String, String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(message.to_string()),
    }
}

/// Reference to another row. Zero is treated as absent.
pub fn reference_id(value: Option<&Value>, message: &str) -> Result<i64, String> {
    match value.and_then(Value::as_i64) {
        Some(id) if id != 0 => Ok(id),
        _ => Err(message.to_string()),
    }
}

/// Any integer, zero included.
pub fn integer(value: Option<&Value>, message: &str) -> Result<i64, String> {
    value.and_then(Value::as_i64).ok_or_else(|| message.to_string())
}

/// Collects every failing field of one body so the client sees them together.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn check<T>(&mut self, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(message) => {
                self.0.push(message);
                None
            }
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_error(self) -> AppError {
        AppError::Validation(self.0)
    }
}

/// Request bodies must be JSON objects.
pub fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_rejects_empty_null_and_non_strings() {
        assert_eq!(non_empty_text(Some(&json!("Ada")), "m"), Ok("Ada".to_string()));
        assert_eq!(non_empty_text(Some(&json!("")), "m"), Err("m".to_string()));
        assert!(non_empty_text(Some(&Value::Null), "m").is_err());
        assert!(non_empty_text(Some(&json!(3)), "m").is_err());
        assert!(non_empty_text(None, "m").is_err());
    }

    #[test]
    fn reference_treats_zero_as_absent() {
        assert_eq!(reference_id(Some(&json!(4)), "m"), Ok(4));
        assert!(reference_id(Some(&json!(0)), "m").is_err());
        assert!(reference_id(Some(&json!("4")), "m").is_err());
        assert!(reference_id(None, "m").is_err());
    }

    #[test]
    fn integer_accepts_zero() {
        assert_eq!(integer(Some(&json!(0)), "m"), Ok(0));
        assert!(integer(Some(&json!(1.5)), "m").is_err());
    }

    #[test]
    fn violations_collect_messages() {
        let mut v = Violations::default();
        assert_eq!(v.check(Ok::<_, String>(1)), Some(1));
        assert_eq!(v.check(Err::<i32, _>("first".to_string())), None);
        v.push("second");
        match v.into_error() {
            AppError::Validation(errors) => assert_eq!(errors, vec!["first", "second"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn body_must_be_object() {
        assert!(body_to_map(json!({"a": 1})).is_ok());
        assert!(matches!(body_to_map(json!([1])), Err(AppError::BadRequest(_))));
    }
}
