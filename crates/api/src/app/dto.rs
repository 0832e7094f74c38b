use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use aviary_core::{Bird, ValidationError};

use crate::app::errors::ApiError;

/// Key wrapping the record in request and response bodies.
pub const BIRD_KEY: &str = "bird";

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct BirdResponse {
    pub bird: Bird,
}

#[derive(Debug, Serialize)]
pub struct BirdsResponse {
    pub birds: Vec<Bird>,
}

// -------------------------
// Request body helpers
// -------------------------

/// Unwrap axum's JSON extraction, turning parse failures into a 400.
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(v)| v)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Take the `{ "bird": { ... } }` payload out of a request body.
pub fn take_bird_payload(body: Value) -> Result<Map<String, Value>, ApiError> {
    let Value::Object(mut outer) = body else {
        return Err(ApiError::BadRequest("request body must be a JSON object".to_string()));
    };

    match outer.remove(BIRD_KEY) {
        Some(Value::Object(payload)) => Ok(payload),
        None | Some(Value::Null) => Err(ValidationError::missing(BIRD_KEY).into()),
        Some(_) => Err(ApiError::BadRequest(format!("`{BIRD_KEY}` must be a JSON object"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwraps_bird_object() {
        let payload = take_bird_payload(json!({ "bird": { "name": "Robin" }, "extra": 1 })).unwrap();
        assert_eq!(payload.get("name"), Some(&json!("Robin")));
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn missing_bird_is_a_validation_error() {
        match take_bird_payload(json!({})) {
            Err(ApiError::Validation(v)) => assert_eq!(v.missing, vec!["bird"]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn wrong_shapes_are_bad_requests() {
        assert!(matches!(take_bird_payload(json!([1, 2])), Err(ApiError::BadRequest(_))));
        assert!(matches!(take_bird_payload(json!({ "bird": "Robin" })), Err(ApiError::BadRequest(_))));
    }
}
