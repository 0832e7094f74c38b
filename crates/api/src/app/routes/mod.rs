use axum::Router;

pub mod birds;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new().merge(birds::router())
}
