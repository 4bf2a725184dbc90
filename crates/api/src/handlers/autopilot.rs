//! Handler for a full autopilot session streamed over SSE.

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use jobfish_core::profile::{JobPreferences, ResumeProfile};
use jobfish_core::validation::{validate_preferences, validate_profile};
use jobfish_pipeline::{EventSink, Session};
use serde::Deserialize;
use tracing::Instrument;

use crate::error::AppResult;
use crate::sse::relay;
use crate::state::AppState;

/// Body of `POST /api/autopilot`.
#[derive(Debug, Deserialize)]
pub struct AutopilotRequest {
    pub profile: ResumeProfile,
    pub preferences: JobPreferences,
}

/// POST /api/autopilot
///
/// Search the first preferred board, then apply to up to
/// `max_applications` results, streaming every step.
pub async fn start_autopilot(
    State(state): State<AppState>,
    Json(input): Json<AutopilotRequest>,
) -> AppResult<Response> {
    validate_profile(&input.profile)?;
    validate_preferences(&input.preferences)?;

    let session = Session::new(
        input.profile,
        input.preferences,
        state.config.session.clone(),
        state.agent.clone(),
        state.recorder.clone(),
    );
    let span = tracing::info_span!("session", session_id = %session.id());

    let (sink, rx) = EventSink::channel(state.config.session.channel_capacity);
    tokio::spawn(session.run(sink).instrument(span));

    Ok(relay(rx))
}
