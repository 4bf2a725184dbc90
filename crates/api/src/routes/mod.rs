pub mod applications;
pub mod apply;
pub mod autopilot;
pub mod health;
pub mod jobs;
pub mod search;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /search          POST  run one search, JSON response
/// /apply           POST  single application, SSE
/// /autopilot       POST  search then apply, SSE
/// /applications    GET   application records
/// /jobs            GET   discovered postings
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/search", search::router())
        .nest("/apply", apply::router())
        .nest("/autopilot", autopilot::router())
        .nest("/applications", applications::router())
        .nest("/jobs", jobs::router())
}
