//! Route definitions for `/autopilot`.

use axum::routing::post;
use axum::Router;

use crate::handlers::autopilot;
use crate::state::AppState;

/// Routes mounted at `/autopilot`.
///
/// ```text
/// POST    /    -> start_autopilot
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(autopilot::start_autopilot))
}
