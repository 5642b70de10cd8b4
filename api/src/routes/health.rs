use crate::response::ApiResponse;
use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use common::{config, state::AppState};
use serde::Serialize;

#[derive(Serialize, Default)]
pub struct HealthResponse {
    pub name: String,
    pub version: String,
}

/// GET /api/health
///
/// Liveness probe; no authentication.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            HealthResponse {
                name: config::project_name(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
            },
            "Service is healthy",
        )),
    )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}
