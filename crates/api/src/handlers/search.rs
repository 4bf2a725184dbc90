//! Handler for a standalone job search.
//!
//! Holds the request open for one agent search run and answers with the
//! normalized candidates.

use axum::extract::State;
use axum::Json;
use jobfish_core::candidates::JobCandidate;
use jobfish_core::profile::JobPreferences;
use jobfish_core::validation::validate_preferences;
use jobfish_pipeline::run_search;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub preferences: JobPreferences,
}

/// Payload of a finished search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_id: String,
    pub board: String,
    pub jobs: Vec<JobCandidate>,
    pub count: usize,
}

/// POST /api/search
///
/// Run a search on the first preferred board and persist its results.
/// Agent failures map to 500 (not configured) or 502 (upstream).
pub async fn search_jobs(
    State(state): State<AppState>,
    Json(input): Json<SearchRequest>,
) -> AppResult<Json<DataResponse<SearchResponse>>> {
    validate_preferences(&input.preferences)?;

    let outcome = run_search(state.agent.as_ref(), &input.preferences, None).await?;

    let search = state
        .recorder
        .record_search(
            &outcome.board.name,
            &outcome.query,
            &outcome.raw_results,
            &outcome.candidates,
        )
        .await?;

    tracing::info!(search_id = %search.id, board = %outcome.board.name, count = outcome.candidates.len(), "Search stored");

    Ok(Json(DataResponse {
        data: SearchResponse {
            search_id: search.id,
            board: outcome.board.name,
            count: outcome.candidates.len(),
            jobs: outcome.candidates,
        },
    }))
}
