//! Domain error model.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// lookup, ownership). Storage failures belong to the persistence layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A payload failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No record exists for the requested identifier.
    #[error("not found")]
    NotFound,

    /// The caller does not own the record it tried to change.
    #[error("forbidden: caller does not own this resource")]
    Forbidden,
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

/// Typed result of checking a payload against the record schema.
///
/// Field names are reported in schema order. A field is `missing` when absent,
/// null or empty, and `invalid` when it holds an object or array (or `null`
/// in an update).
#[derive(Debug, Error, Clone, Default, PartialEq, Eq, Serialize)]
#[error("validation failed: {}", self.describe())]
pub struct ValidationError {
    pub missing: Vec<String>,
    pub invalid: Vec<String>,
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            missing: vec![field.into()],
            invalid: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    /// Turn an accumulated error into `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing required field(s): {}", self.missing.join(", ")));
        }
        if !self.invalid.is_empty() {
            parts.push(format!("field(s) must be text: {}", self.invalid.join(", ")));
        }
        parts.join("; ")
    }
}
