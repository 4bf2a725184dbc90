//! Route definitions for `/apply`.

use axum::routing::post;
use axum::Router;

use crate::handlers::apply;
use crate::state::AppState;

/// Routes mounted at `/apply`.
///
/// ```text
/// POST    /    -> apply_to_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(apply::apply_to_job))
}
