//! Route definitions for `/search`.

use axum::routing::post;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Routes mounted at `/search`.
///
/// ```text
/// POST    /    -> search_jobs
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(search::search_jobs))
}
