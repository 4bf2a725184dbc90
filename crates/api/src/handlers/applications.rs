use axum::extract::{Query, State};
use axum::Json;
use jobfish_db::models::application::{Application, ApplicationListQuery};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/applications
///
/// Application records, newest first. `?limit=` defaults to 50, max 200.
pub async fn list_applications(
    State(state): State<AppState>,
    Query(params): Query<ApplicationListQuery>,
) -> AppResult<Json<DataResponse<Vec<Application>>>> {
    let applications = state.recorder.list(&params).await?;
    Ok(Json(DataResponse { data: applications }))
}
