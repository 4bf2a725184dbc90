//! Shared fixtures for orchestrator tests: a scripted event source and
//! canned profiles.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use jobfish_agent::messages::parse_value;
use jobfish_agent::{AgentError, AgentFrame, EventSource, EventStream};
use jobfish_core::profile::{JobPreferences, ResumeProfile};
use jobfish_core::session_events::SessionEvent;
use jobfish_db::DbPool;
use jobfish_pipeline::{EventSink, OutcomeRecorder, Session, SessionConfig, SessionSummary};
use serde_json::{json, Value};

pub type Frame = Result<AgentFrame, AgentError>;

/// What one call to `run` should produce.
pub enum Script {
    Stream(Vec<Frame>),
    Fail(AgentError),
}

/// Event source that replays one script per call, in order.
#[derive(Default)]
pub struct ScriptedSource {
    scripts: Mutex<VecDeque<Script>>,
    calls: Mutex<Vec<(String, String)>>,
    call_times: Mutex<Vec<Instant>>,
}

impl ScriptedSource {
    pub fn new(scripts: Vec<Script>) -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(scripts.into()),
            calls: Mutex::new(Vec::new()),
            call_times: Mutex::new(Vec::new()),
        })
    }

    /// `(url, goal)` of every run started so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// When each run was started, in call order.
    pub fn call_times(&self) -> Vec<Instant> {
        self.call_times.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn run(&self, url: &str, goal: &str) -> Result<EventStream, AgentError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), goal.to_string()));
        self.call_times.lock().unwrap().push(Instant::now());

        let script = self.scripts.lock().unwrap().pop_front();
        match script {
            Some(Script::Stream(frames)) => Ok(stream::iter(frames).boxed()),
            Some(Script::Fail(err)) => Err(err),
            None => Err(AgentError::Transport("no script left".into())),
        }
    }
}

pub fn event(raw: Value) -> Frame {
    Ok(AgentFrame::Event(parse_value(raw).unwrap()))
}

pub fn started() -> Frame {
    event(json!({"type": "STARTED", "runId": "run-1"}))
}

pub fn progress(purpose: &str) -> Frame {
    event(json!({"type": "PROGRESS", "purpose": purpose}))
}

pub fn complete(status: &str, result: Value) -> Frame {
    event(json!({"type": "COMPLETE", "status": status, "resultJson": result}))
}

/// A search run that finds `jobs`.
pub fn search_script(jobs: Value) -> Script {
    Script::Stream(vec![started(), progress("Searching"), complete("COMPLETED", jobs)])
}

/// An apply run that completes with `status`.
pub fn apply_script(status: &str) -> Script {
    Script::Stream(vec![
        started(),
        event(json!({"type": "STREAMING_URL", "streamingUrl": "https://live.example/1"})),
        progress("Filling form"),
        complete(status, json!({"success": status == "COMPLETED", "confirmation_id": "C-1"})),
    ])
}

pub fn profile() -> ResumeProfile {
    ResumeProfile {
        full_name: "Sam Doe".into(),
        email: "sam@example.com".into(),
        phone: "+1 555 0100".into(),
        location: "Berlin".into(),
        linkedin_url: None,
        github_url: None,
        years_experience: 5,
        skills: vec!["Rust".into(), "SQL".into()],
        summary: "Backend engineer.".into(),
        education: "BSc".into(),
        most_recent_role: "Engineer".into(),
        most_recent_company: "Acme".into(),
    }
}

pub fn preferences(max_applications: u32) -> JobPreferences {
    JobPreferences {
        job_titles: vec!["Engineer".into()],
        locations: vec!["Remote".into()],
        remote_ok: true,
        min_salary: None,
        job_boards: vec!["greenhouse".into()],
        max_applications,
    }
}

pub fn no_pause() -> SessionConfig {
    with_pause(0)
}

pub fn with_pause(apply_pause_ms: u64) -> SessionConfig {
    SessionConfig {
        apply_pause_ms,
        channel_capacity: 16,
    }
}

pub fn agent_error(message: &str) -> Frame {
    event(json!({"type": "ERROR", "message": message}))
}

/// Reject every write to `applications.result` so terminal updates fail.
pub async fn reject_result_writes(pool: &DbPool) {
    sqlx::query(
        "CREATE TRIGGER reject_result_writes BEFORE UPDATE OF result ON applications \
         BEGIN SELECT RAISE(ABORT, 'result writes disabled'); END",
    )
    .execute(pool)
    .await
    .unwrap();
}

/// Run a session to completion and collect every frame it emitted.
pub async fn run_session(
    source: Arc<ScriptedSource>,
    pool: DbPool,
    preferences: JobPreferences,
) -> (SessionSummary, Vec<SessionEvent>) {
    let (sink, mut rx) = EventSink::channel(16);
    let session = Session::new(
        profile(),
        preferences,
        no_pause(),
        source,
        OutcomeRecorder::new(pool),
    );
    let handle = tokio::spawn(session.run(sink));

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    (handle.await.unwrap(), events)
}

pub fn kinds(events: &[SessionEvent]) -> Vec<&'static str> {
    events.iter().map(SessionEvent::kind).collect()
}
