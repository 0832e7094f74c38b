//! Error → HTTP response mapping.
//!
//! | Error | Status | code |
//! |-------|--------|------|
//! | `Unauthenticated` | 401 | `unauthenticated` |
//! | `NotFound` | 404 | `not_found` |
//! | `Forbidden` | 401 | `forbidden` |
//! | `Validation` | 422 | `validation_error` |
//! | `BadRequest` | 400 | `bad_request` |
//! | `Internal` | 500 | `internal_error` |
//!
//! Ownership failures answer 401, not 403. Existing clients of this API key
//! off that status, so it stays.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use aviary_core::{DomainError, ValidationError};
use aviary_infra::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("resource not found")]
    NotFound,

    #[error("caller does not own this resource")]
    Forbidden,

    #[error(transparent)]
    Validation(ValidationError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::Forbidden => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Validation(_) => "validation_error",
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(v) => Self::Validation(v),
            // An id that does not parse cannot name a stored record.
            DomainError::InvalidId(_) | DomainError::NotFound => Self::NotFound,
            DomainError::Forbidden => Self::Forbidden,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        match self {
            Self::Validation(v) => (
                status,
                axum::Json(json!({
                    "error": code,
                    "message": v.to_string(),
                    "missing": v.missing,
                    "invalid": v.invalid,
                })),
            )
                .into_response(),
            Self::Internal(e) => {
                tracing::error!(error = %e, "request failed on store error");
                json_error(status, code, "internal server error")
            }
            other => json_error(status, code, other.to_string()),
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
