//! Handler for a single application run streamed over SSE.

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use jobfish_core::goals::{build_apply_goal, PLACEHOLDER_COMPANY, PLACEHOLDER_TITLE};
use jobfish_core::profile::ResumeProfile;
use jobfish_core::types::new_id;
use jobfish_core::validation::{validate_job_url, validate_profile};
use jobfish_db::models::application::CreateApplication;
use jobfish_pipeline::{run_single_application, ApplyRun, EventSink};
use serde::Deserialize;
use tracing::Instrument;

use crate::error::AppResult;
use crate::sse::relay;
use crate::state::AppState;

/// Body of `POST /api/apply`.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub profile: ResumeProfile,
    pub job_url: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
}

/// POST /api/apply
///
/// Create the application record (`running`), then stream the run:
/// `JOB_STARTED`, `APP_PROGRESS`..., and `APP_DONE` or `ERROR`.
pub async fn apply_to_job(
    State(state): State<AppState>,
    Json(input): Json<ApplyRequest>,
) -> AppResult<Response> {
    validate_profile(&input.profile)?;
    let job_url = validate_job_url(input.job_url.as_deref())?.to_string();

    let record = state
        .recorder
        .create_pending(&CreateApplication {
            id: new_id(),
            session_id: None,
            job_url: job_url.clone(),
            job_title: input.job_title.clone(),
            company: input.company.clone(),
            applicant: input.profile.full_name.clone(),
        })
        .await?;

    let goal = build_apply_goal(
        &input.profile,
        input.job_title.as_deref().unwrap_or(PLACEHOLDER_TITLE),
        input.company.as_deref().unwrap_or(PLACEHOLDER_COMPANY),
    );

    let run = ApplyRun {
        application_id: record.id.clone(),
        job_index: 1,
        job_url,
        goal,
    };

    let (sink, rx) = EventSink::channel(state.config.session.channel_capacity);
    let span = tracing::info_span!("apply", application_id = %record.id);
    tokio::spawn(
        async move {
            run_single_application(state.agent.as_ref(), &state.recorder, &sink, run).await;
        }
        .instrument(span),
    );

    Ok(relay(rx))
}
