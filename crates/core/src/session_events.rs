//! Outbound event schema relayed to clients over SSE.
//!
//! Every frame is a JSON object with a `type` discriminator and camelCase
//! fields. Upstream agent events are embedded verbatim under `event`.

use serde::Serialize;
use serde_json::Value;

use crate::candidates::JobCandidate;

/// Status carried by the terminal frame of a session that found nothing.
pub const STATUS_NO_JOBS_FOUND: &str = "NO_JOBS_FOUND";

/// One frame of an outbound session stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum SessionEvent {
    /// An autopilot session was accepted.
    SessionStarted { session_id: String },

    /// The search run is about to start on `board`.
    Searching { board: String },

    /// An upstream event from the search run.
    SearchProgress { event: Value },

    /// The search completed and produced these candidates.
    JobsFound { count: usize, jobs: Vec<JobCandidate> },

    /// The search failed; the session ends.
    SearchError { message: String },

    /// An apply run is starting for the candidate at `job_index` (1-based).
    Applying {
        job_index: usize,
        job_title: String,
        company: String,
    },

    /// An upstream event from an apply run.
    AppProgress { job_index: usize, event: Value },

    /// An apply run reached its terminal event.
    AppDone {
        job_index: usize,
        success: bool,
        result: Value,
    },

    /// An apply run failed without a terminal event.
    AppError { job_index: usize, message: String },

    /// All attempted applications were processed.
    SessionComplete { applied: usize, attempted: usize },

    /// Session terminal frame for outcomes without applications
    /// (see [`STATUS_NO_JOBS_FOUND`]).
    Complete { status: String },

    /// A single application run was accepted; `job_id` is the record id.
    JobStarted { job_id: String },

    /// A single application run failed.
    Error { message: String },
}

impl SessionEvent {
    /// The `type` discriminator as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. } => "SESSION_STARTED",
            Self::Searching { .. } => "SEARCHING",
            Self::SearchProgress { .. } => "SEARCH_PROGRESS",
            Self::JobsFound { .. } => "JOBS_FOUND",
            Self::SearchError { .. } => "SEARCH_ERROR",
            Self::Applying { .. } => "APPLYING",
            Self::AppProgress { .. } => "APP_PROGRESS",
            Self::AppDone { .. } => "APP_DONE",
            Self::AppError { .. } => "APP_ERROR",
            Self::SessionComplete { .. } => "SESSION_COMPLETE",
            Self::Complete { .. } => "COMPLETE",
            Self::JobStarted { .. } => "JOB_STARTED",
            Self::Error { .. } => "ERROR",
        }
    }

    /// Terminal frame for a session whose search found nothing.
    pub fn no_jobs_found() -> Self {
        Self::Complete {
            status: STATUS_NO_JOBS_FOUND.to_string(),
        }
    }
}
