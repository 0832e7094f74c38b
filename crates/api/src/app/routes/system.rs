use axum::http::StatusCode;

/// Liveness probe; needs no token.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
