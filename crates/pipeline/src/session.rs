//! Autopilot session: one search, then sequential applications.
//!
//! ```text
//! Idle -> Searching -> SearchFailed
//!                   -> NoJobs
//!                   -> Applying(i) ... -> Complete
//! ```
//!
//! Every path ends with exactly one terminal frame on the sink
//! (`SEARCH_ERROR`, `COMPLETE{NO_JOBS_FOUND}` or `SESSION_COMPLETE`), unless
//! the client disconnected first.

use std::sync::Arc;

use jobfish_agent::EventSource;
use jobfish_core::goals::build_apply_goal;
use jobfish_core::job_boards::resolve_board;
use jobfish_core::profile::{JobPreferences, ResumeProfile};
use jobfish_core::session_events::SessionEvent;
use jobfish_core::types::{new_id, RecordId};
use jobfish_db::models::application::CreateApplication;

use crate::apply::{drive_application, ApplyRun};
use crate::config::SessionConfig;
use crate::recorder::OutcomeRecorder;
use crate::search::run_search;
use crate::sink::EventSink;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Searching,
    SearchFailed,
    NoJobs,
    /// Applying to the candidate at this 1-based position.
    Applying(usize),
    Complete,
    /// The client went away before the session finished.
    Abandoned,
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub phase: SessionPhase,
    pub found: usize,
    pub applied: usize,
    pub attempted: usize,
}

/// One autopilot session.
pub struct Session {
    id: RecordId,
    profile: ResumeProfile,
    preferences: JobPreferences,
    config: SessionConfig,
    source: Arc<dyn EventSource>,
    recorder: OutcomeRecorder,
    phase: SessionPhase,
}

impl Session {
    pub fn new(
        profile: ResumeProfile,
        preferences: JobPreferences,
        config: SessionConfig,
        source: Arc<dyn EventSource>,
        recorder: OutcomeRecorder,
    ) -> Self {
        Self {
            id: new_id(),
            profile,
            preferences,
            config,
            source,
            recorder,
            phase: SessionPhase::Idle,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn transition(&mut self, next: SessionPhase) {
        tracing::debug!(session_id = %self.id, from = ?self.phase, to = ?next, "Session transition");
        self.phase = next;
    }

    fn summary(&self, found: usize, applied: usize, attempted: usize) -> SessionSummary {
        SessionSummary {
            phase: self.phase,
            found,
            applied,
            attempted,
        }
    }

    /// Run the session to completion, emitting every frame on `sink`.
    pub async fn run(mut self, sink: EventSink) -> SessionSummary {
        tracing::info!(session_id = %self.id, "Autopilot session started");

        sink.emit(SessionEvent::SessionStarted {
            session_id: self.id.clone(),
        })
        .await;

        self.transition(SessionPhase::Searching);
        let board = resolve_board(&self.preferences);
        sink.emit(SessionEvent::Searching {
            board: board.name.clone(),
        })
        .await;

        let outcome = match run_search(self.source.as_ref(), &self.preferences, Some(&sink)).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(session_id = %self.id, error = %err, "Search failed");
                self.transition(SessionPhase::SearchFailed);
                sink.emit(SessionEvent::SearchError {
                    message: err.to_string(),
                })
                .await;
                return self.summary(0, 0, 0);
            }
        };

        if let Err(e) = self
            .recorder
            .record_search(
                &outcome.board.name,
                &outcome.query,
                &outcome.raw_results,
                &outcome.candidates,
            )
            .await
        {
            tracing::error!(session_id = %self.id, error = %e, "Failed to persist search results");
        }

        let found = outcome.candidates.len();
        sink.emit(SessionEvent::JobsFound {
            count: found,
            jobs: outcome.candidates.clone(),
        })
        .await;

        if found == 0 {
            self.transition(SessionPhase::NoJobs);
            sink.emit(SessionEvent::no_jobs_found()).await;
            return self.summary(0, 0, 0);
        }

        let max_attempts = self.preferences.max_applications as usize;
        let mut applied = 0;
        let mut attempted = 0;

        for (position, candidate) in outcome.candidates.iter().enumerate() {
            if attempted >= max_attempts {
                break;
            }
            let Some(job_url) = candidate.application_url.as_deref() else {
                tracing::debug!(session_id = %self.id, position, "Skipping candidate without application url");
                continue;
            };
            if attempted > 0 && !self.config.apply_pause().is_zero() {
                tokio::time::sleep(self.config.apply_pause()).await;
            }
            if sink.is_closed() {
                tracing::info!(session_id = %self.id, attempted, "Client disconnected; stopping session");
                self.transition(SessionPhase::Abandoned);
                return self.summary(found, applied, attempted);
            }

            attempted += 1;
            let job_index = position + 1;
            let title = candidate.display_title();
            let company = candidate.display_company();
            self.transition(SessionPhase::Applying(job_index));

            sink.emit(SessionEvent::Applying {
                job_index,
                job_title: title.to_string(),
                company: company.to_string(),
            })
            .await;

            let record = CreateApplication {
                id: new_id(),
                session_id: Some(self.id.clone()),
                job_url: job_url.to_string(),
                job_title: candidate.title.clone(),
                company: candidate.company.clone(),
                applicant: self.profile.full_name.clone(),
            };
            if let Err(e) = self.recorder.create_pending(&record).await {
                tracing::error!(session_id = %self.id, job_index, error = %e, "Failed to create application record");
                sink.emit(SessionEvent::AppError {
                    job_index,
                    message: e.to_string(),
                })
                .await;
                continue;
            }

            let run = ApplyRun {
                application_id: record.id,
                job_index,
                job_url: job_url.to_string(),
                goal: build_apply_goal(&self.profile, title, company),
            };

            match drive_application(self.source.as_ref(), &self.recorder, &sink, &run).await {
                Ok(result) if result.success => applied += 1,
                Ok(_) => {}
                Err(err) => {
                    sink.emit(SessionEvent::AppError {
                        job_index,
                        message: err.to_string(),
                    })
                    .await;
                }
            }
        }

        self.transition(SessionPhase::Complete);
        tracing::info!(session_id = %self.id, applied, attempted, "Autopilot session complete");
        sink.emit(SessionEvent::SessionComplete { applied, attempted }).await;

        self.summary(found, applied, attempted)
    }
}
