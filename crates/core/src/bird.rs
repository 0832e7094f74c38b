//! Bird record schema.
//!
//! Payloads arrive as loose JSON objects. [`NewBird`] and [`BirdChanges`] are
//! the only ways to turn them into something that can touch a [`Bird`], so the
//! schema is checked before anything reaches the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::Owned;
use crate::error::ValidationError;
use crate::id::{BirdId, UserId};

/// Client-writable fields, in schema order.
pub const BIRD_FIELDS: [&str; 4] = ["name", "species", "location", "image"];

/// Key that clients may send but must never be able to set.
pub const OWNER_FIELD: &str = "owner";

/// A persisted bird record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bird {
    pub id: BirdId,
    pub name: String,
    pub species: String,
    pub location: String,
    pub image: String,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bird {
    /// Build a fresh record owned by `owner`.
    pub fn create(new: NewBird, owner: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: BirdId::new(),
            name: new.name,
            species: new.species,
            location: new.location,
            image: new.image,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update. Fields absent from `changes` keep their values.
    pub fn apply(&mut self, changes: BirdChanges, now: DateTime<Utc>) {
        let BirdChanges {
            name,
            species,
            location,
            image,
        } = changes;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(species) = species {
            self.species = species;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(image) = image {
            self.image = image;
        }
        self.updated_at = now;
    }
}

impl Owned for Bird {
    fn owner(&self) -> UserId {
        self.owner
    }
}

/// A validated create payload. Carries no owner: that comes from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBird {
    pub name: String,
    pub species: String,
    pub location: String,
    pub image: String,
}

impl NewBird {
    /// Check every required field and report all failures at once.
    ///
    /// Unknown keys (including `owner`) are ignored.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut err = ValidationError::default();
        let values = BIRD_FIELDS.map(|field| match payload.get(field).map(as_text) {
            None | Some(Ok(None)) => {
                err.missing.push(field.to_string());
                String::new()
            }
            Some(Ok(Some(s))) if s.is_empty() => {
                err.missing.push(field.to_string());
                String::new()
            }
            Some(Ok(Some(s))) => s,
            Some(Err(())) => {
                err.invalid.push(field.to_string());
                String::new()
            }
        });

        let [name, species, location, image] = values;
        err.into_result(Self {
            name,
            species,
            location,
            image,
        })
    }
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BirdChanges {
    pub name: Option<String>,
    pub species: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

impl BirdChanges {
    /// Pick the writable fields out of an update payload.
    ///
    /// Keys outside the schema are dropped. Numbers and booleans are stored in
    /// their text form; `null`, objects and arrays are rejected.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut err = ValidationError::default();
        let values = BIRD_FIELDS.map(|field| match payload.get(field).map(as_text) {
            None => None,
            Some(Ok(Some(s))) => Some(s),
            Some(Ok(None) | Err(())) => {
                err.invalid.push(field.to_string());
                None
            }
        });

        let [name, species, location, image] = values;
        err.into_result(Self {
            name,
            species,
            location,
            image,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.species.is_none() && self.location.is_none() && self.image.is_none()
    }
}

/// Text form of a scalar field value. `Ok(None)` for `null`, `Err` for
/// objects and arrays.
fn as_text(value: &Value) -> Result<Option<String>, ()> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn robin(owner: UserId) -> Bird {
        let new = NewBird::from_payload(&object(json!({
            "name": "Robin",
            "species": "Erithacus rubecula",
            "location": "UK",
            "image": "http://x/y.png",
        })))
        .unwrap();
        Bird::create(new, owner, Utc::now())
    }

    #[test]
    fn create_ignores_client_owner() {
        let caller = UserId::new();
        let payload = object(json!({
            "name": "Robin",
            "species": "Erithacus",
            "location": "UK",
            "image": "http://x/y.png",
            "owner": UserId::new().to_string(),
        }));

        let bird = Bird::create(NewBird::from_payload(&payload).unwrap(), caller, Utc::now());
        assert_eq!(bird.owner, caller);
        assert_eq!(bird.created_at, bird.updated_at);
    }

    #[test]
    fn missing_and_blank_fields_are_reported_together() {
        let err = NewBird::from_payload(&object(json!({
            "name": "",
            "species": "Erithacus",
            "location": null,
        })))
        .unwrap_err();

        assert_eq!(err.missing, vec!["name", "location", "image"]);
        assert!(err.invalid.is_empty());
    }

    #[test]
    fn scalar_fields_are_stored_as_text() {
        let new = NewBird::from_payload(&object(json!({
            "name": "Robin",
            "species": 42,
            "location": true,
            "image": 1.5,
        })))
        .unwrap();

        assert_eq!(new.species, "42");
        assert_eq!(new.location, "true");
        assert_eq!(new.image, "1.5");
    }

    #[test]
    fn container_fields_are_invalid() {
        let err = NewBird::from_payload(&object(json!({
            "name": "Robin",
            "species": { "genus": "Erithacus" },
            "location": ["UK"],
            "image": "http://x/y.png",
        })))
        .unwrap_err();

        assert!(err.missing.is_empty());
        assert_eq!(err.invalid, vec!["species", "location"]);
    }

    #[test]
    fn whitespace_is_not_blank() {
        let new = NewBird::from_payload(&object(json!({
            "name": " ",
            "species": "Erithacus",
            "location": "UK",
            "image": "http://x/y.png",
        })))
        .unwrap();
        assert_eq!(new.name, " ");
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let owner = UserId::new();
        let mut bird = robin(owner);
        let before = bird.clone();

        let changes = BirdChanges::from_payload(&object(json!({ "location": "Paris" }))).unwrap();
        bird.apply(changes, before.updated_at + chrono::Duration::seconds(1));

        assert_eq!(bird.location, "Paris");
        assert_eq!(bird.name, before.name);
        assert_eq!(bird.species, before.species);
        assert_eq!(bird.image, before.image);
        assert_eq!(bird.owner, owner);
        assert_eq!(bird.id, before.id);
        assert_eq!(bird.created_at, before.created_at);
        assert!(bird.updated_at > before.updated_at);
    }

    #[test]
    fn changes_drop_unknown_keys_and_owner() {
        let changes = BirdChanges::from_payload(&object(json!({
            "owner": UserId::new().to_string(),
            "id": "something",
            "wingspan": 30,
        })))
        .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn changes_take_numbers_and_booleans_as_text() {
        let changes = BirdChanges::from_payload(&object(json!({ "species": 7, "image": false }))).unwrap();
        assert_eq!(changes.species.as_deref(), Some("7"));
        assert_eq!(changes.image.as_deref(), Some("false"));
        assert_eq!(changes.name, None);
    }

    #[test]
    fn changes_reject_null_and_containers() {
        let err = BirdChanges::from_payload(&object(json!({
            "name": null,
            "location": ["Paris"],
            "image": { "url": "x" },
        })))
        .unwrap_err();
        assert_eq!(err.invalid, vec!["name", "location", "image"]);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let bird = robin(UserId::new());
        let value = serde_json::to_value(&bird).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["id", "name", "species", "location", "image", "owner", "createdAt", "updatedAt"] {
            assert!(keys.contains(&key), "missing key {key}");
        }
        assert_eq!(value["owner"], bird.owner.to_string());
    }
}
