use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    pub service: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// `live`, `mock` or `unconfigured`.
    pub agent_mode: &'static str,
}

/// GET /health -- returns service, database and agent health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = jobfish_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        service: "JobFish",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        agent_mode: state.agent_mode.as_str(),
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
