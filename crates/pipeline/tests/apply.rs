//! Standalone application runs and the outcome recorder.

mod common;

use assert_matches::assert_matches;
use common::*;
use jobfish_agent::AgentError;
use jobfish_core::session_events::SessionEvent;
use jobfish_core::types::new_id;
use jobfish_db::models::application::{ApplicationListQuery, CreateApplication};
use jobfish_db::models::status::ApplicationStatus;
use jobfish_db::repositories::ApplicationRepo;
use jobfish_pipeline::{run_single_application, ApplyRun, EventSink, OutcomeRecorder, RecorderError};
use serde_json::json;
use sqlx::SqlitePool;

fn new_record() -> CreateApplication {
    CreateApplication {
        id: new_id(),
        session_id: None,
        job_url: "https://jobs.example/apply".into(),
        job_title: Some("Engineer".into()),
        company: Some("Acme".into()),
        applicant: "Sam Doe".into(),
    }
}

async fn run_single(source: std::sync::Arc<ScriptedSource>, recorder: &OutcomeRecorder, id: &str) -> Vec<SessionEvent> {
    let (sink, mut rx) = EventSink::channel(32);
    let run = ApplyRun {
        application_id: id.to_string(),
        job_index: 1,
        job_url: "https://jobs.example/apply".into(),
        goal: "apply".into(),
    };
    run_single_application(source.as_ref(), recorder, &sink, run).await;
    drop(sink);

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

// ---------------------------------------------------------------------------
// Single application
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn single_application_completes(pool: SqlitePool) {
    let recorder = OutcomeRecorder::new(pool.clone());
    let record = recorder.create_pending(&new_record()).await.unwrap();
    assert_eq!(record.status, ApplicationStatus::Running);

    let source = ScriptedSource::new(vec![apply_script("COMPLETED")]);
    let events = run_single(source, &recorder, &record.id).await;

    assert_eq!(
        kinds(&events),
        vec!["JOB_STARTED", "APP_PROGRESS", "APP_PROGRESS", "APP_PROGRESS", "APP_PROGRESS", "APP_DONE"]
    );
    assert_eq!(events[0], SessionEvent::JobStarted { job_id: record.id.clone() });
    assert_matches!(
        &events[5],
        SessionEvent::AppDone { job_index: 1, success: true, result } if result["confirmation_id"] == "C-1"
    );

    let stored = ApplicationRepo::find_by_id(&pool, &record.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ApplicationStatus::Completed);
    assert_eq!(stored.result.unwrap().0["confirmation_id"], "C-1");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn single_application_stream_drop_marks_error(pool: SqlitePool) {
    let recorder = OutcomeRecorder::new(pool.clone());
    let record = recorder.create_pending(&new_record()).await.unwrap();

    let source = ScriptedSource::new(vec![Script::Stream(vec![started(), progress("Opening")])]);
    let events = run_single(source, &recorder, &record.id).await;

    assert_matches!(events.last(), Some(SessionEvent::Error { .. }));

    let stored = ApplicationRepo::find_by_id(&pool, &record.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ApplicationStatus::Error);
    assert!(stored.error.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn single_application_unconfigured_agent_marks_error(pool: SqlitePool) {
    let recorder = OutcomeRecorder::new(pool.clone());
    let record = recorder.create_pending(&new_record()).await.unwrap();

    let source = ScriptedSource::new(vec![Script::Fail(AgentError::Configuration("no key".into()))]);
    let events = run_single(source, &recorder, &record.id).await;

    assert_eq!(kinds(&events), vec!["JOB_STARTED", "ERROR"]);
    let stored = ApplicationRepo::find_by_id(&pool, &record.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ApplicationStatus::Error);
    assert!(stored.error.unwrap().contains("no key"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn single_application_unstored_outcome_marks_error(pool: SqlitePool) {
    reject_result_writes(&pool).await;
    let recorder = OutcomeRecorder::new(pool.clone());
    let record = recorder.create_pending(&new_record()).await.unwrap();

    let source = ScriptedSource::new(vec![apply_script("COMPLETED")]);
    let events = run_single(source, &recorder, &record.id).await;

    assert!(!kinds(&events).contains(&"APP_DONE"));
    assert_matches!(
        events.last(),
        Some(SessionEvent::Error { message }) if message.starts_with("Failed to record outcome")
    );

    let stored = ApplicationRepo::find_by_id(&pool, &record.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ApplicationStatus::Error);
    assert!(stored.error.unwrap().contains("result writes disabled"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn agent_error_message_is_recorded(pool: SqlitePool) {
    let recorder = OutcomeRecorder::new(pool.clone());
    let record = recorder.create_pending(&new_record()).await.unwrap();

    let source = ScriptedSource::new(vec![Script::Stream(vec![
        started(),
        agent_error("captcha blocked the form"),
    ])]);
    let events = run_single(source, &recorder, &record.id).await;

    assert_matches!(
        events.last(),
        Some(SessionEvent::Error { message }) if message.contains("captcha blocked the form")
    );
    let stored = ApplicationRepo::find_by_id(&pool, &record.id).await.unwrap().unwrap();
    assert_eq!(stored.error.as_deref(), Some("Agent reported an error: captcha blocked the form"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_frames_are_skipped(pool: SqlitePool) {
    let recorder = OutcomeRecorder::new(pool.clone());
    let record = recorder.create_pending(&new_record()).await.unwrap();

    let source = ScriptedSource::new(vec![Script::Stream(vec![
        started(),
        Ok(jobfish_agent::AgentFrame::Malformed {
            line: "garbage".into(),
            reason: "expected value".into(),
        }),
        complete("COMPLETED", json!({"success": true})),
    ])]);
    let events = run_single(source, &recorder, &record.id).await;

    assert_eq!(kinds(&events), vec!["JOB_STARTED", "APP_PROGRESS", "APP_PROGRESS", "APP_DONE"]);
}

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_record_id_is_rejected(pool: SqlitePool) {
    let recorder = OutcomeRecorder::new(pool);
    let input = new_record();
    recorder.create_pending(&input).await.unwrap();

    assert_matches!(
        recorder.create_pending(&input).await,
        Err(RecorderError::DuplicateId(id)) if id == input.id
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn terminal_status_can_be_overwritten(pool: SqlitePool) {
    let recorder = OutcomeRecorder::new(pool.clone());
    let record = recorder.create_pending(&new_record()).await.unwrap();

    recorder.mark_terminal(&record.id, false, &json!("captcha")).await.unwrap();
    recorder.mark_terminal(&record.id, true, &json!({"ok": true})).await.unwrap();

    let apps = recorder.list(&ApplicationListQuery::default()).await.unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].status, ApplicationStatus::Completed);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_id_updates_are_not_errors(pool: SqlitePool) {
    let recorder = OutcomeRecorder::new(pool);
    assert!(recorder.mark_terminal("missing", true, &json!(null)).await.is_ok());
    assert!(recorder.mark_error("missing", "boom").await.is_ok());
}
