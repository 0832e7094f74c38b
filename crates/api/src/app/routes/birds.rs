use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use aviary_core::{remove_blanks, BirdId};

use crate::app::dto::{self, BirdResponse, BirdsResponse};
use crate::app::errors::ApiError;
use crate::app::services::BirdService;
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/birds", get(list_mine).post(create_bird))
        .route("/birds-all", get(list_all))
        .route("/birds/:id", get(show_bird).patch(update_bird).delete(delete_bird))
}

/// GET /birds: records owned by the caller.
pub async fn list_mine(
    Extension(services): Extension<BirdService>,
    Extension(caller): Extension<CallerContext>,
) -> Result<Response, ApiError> {
    let birds = services.list_mine(caller.user_id()).await?;
    Ok((StatusCode::OK, Json(BirdsResponse { birds })).into_response())
}

/// GET /birds-all: every record regardless of owner.
pub async fn list_all(Extension(services): Extension<BirdService>) -> Result<Response, ApiError> {
    let birds = services.list_all().await?;
    Ok((StatusCode::OK, Json(BirdsResponse { birds })).into_response())
}

/// GET /birds/:id
pub async fn show_bird(
    Extension(services): Extension<BirdService>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let bird = services.get_one(parse_id(&id)?).await?;
    Ok((StatusCode::OK, Json(BirdResponse { bird })).into_response())
}

/// POST /birds
pub async fn create_bird(
    Extension(services): Extension<BirdService>,
    Extension(caller): Extension<CallerContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = dto::take_bird_payload(dto::json_body(body)?)?;
    let bird = services.create(caller.user_id(), &payload).await?;
    Ok((StatusCode::CREATED, Json(BirdResponse { bird })).into_response())
}

/// PATCH /birds/:id
///
/// The record is looked up and its owner checked before the body is read, so
/// a bad body never hides `NotFound` or `Forbidden`.
pub async fn update_bird(
    Extension(services): Extension<BirdService>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let bird = services.owned_by(parse_id(&id)?, caller.user_id()).await?;

    let mut body = dto::json_body(body)?;
    remove_blanks(&mut body);
    let payload = dto::take_bird_payload(body)?;

    services.update(bird, payload).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// DELETE /birds/:id
pub async fn delete_bird(
    Extension(services): Extension<BirdService>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    services.delete(parse_id(&id)?, caller.user_id()).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

fn parse_id(raw: &str) -> Result<BirdId, ApiError> {
    Ok(raw.parse::<BirdId>()?)
}
