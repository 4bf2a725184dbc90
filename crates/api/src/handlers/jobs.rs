use axum::extract::{Query, State};
use axum::Json;
use jobfish_db::models::job::{DiscoveredJob, JobListQuery};
use jobfish_db::repositories::JobRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/jobs
///
/// Postings discovered by past searches, newest first.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> AppResult<Json<DataResponse<Vec<DiscoveredJob>>>> {
    let jobs = JobRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: jobs }))
}
