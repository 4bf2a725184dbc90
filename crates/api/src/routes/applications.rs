//! Route definitions for `/applications`.

use axum::routing::get;
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET    /    -> list_applications
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(applications::list_applications))
}
