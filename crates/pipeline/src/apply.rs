//! One application run and its persistence.

use futures::StreamExt;
use jobfish_agent::{AgentFrame, EventSource, UpstreamEventKind};
use jobfish_core::session_events::SessionEvent;
use jobfish_core::types::RecordId;
use serde_json::Value;

use crate::error::RunError;
use crate::recorder::OutcomeRecorder;
use crate::sink::EventSink;

/// Inputs for one apply run whose record already exists (`running`).
#[derive(Debug, Clone)]
pub struct ApplyRun {
    pub application_id: RecordId,
    /// 1-based position used in relayed frames.
    pub job_index: usize,
    pub job_url: String,
    pub goal: String,
}

/// Terminal outcome of an apply run that reached `COMPLETE`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    pub success: bool,
    pub result: Value,
}

/// Stream one apply run, relaying `APP_PROGRESS` and ending with `APP_DONE`.
///
/// On `COMPLETE` the terminal status is persisted before `APP_DONE` is
/// emitted. On any failure, including a failed terminal write, the record
/// is marked `error` before this returns, so the caller can report it
/// knowing the record is final.
pub async fn drive_application(
    source: &dyn EventSource,
    recorder: &OutcomeRecorder,
    sink: &EventSink,
    run: &ApplyRun,
) -> Result<ApplyOutcome, RunError> {
    match stream_application(source, recorder, sink, run).await {
        Ok(outcome) => Ok(outcome),
        Err(err) => {
            let message = err.to_string();
            tracing::warn!(
                application_id = %run.application_id,
                job_index = run.job_index,
                error = %message,
                "Application run failed",
            );
            if let Err(e) = recorder.mark_error(&run.application_id, &message).await {
                tracing::error!(application_id = %run.application_id, error = %e, "Failed to persist application error");
            }
            Err(err)
        }
    }
}

async fn stream_application(
    source: &dyn EventSource,
    recorder: &OutcomeRecorder,
    sink: &EventSink,
    run: &ApplyRun,
) -> Result<ApplyOutcome, RunError> {
    let mut stream = source.run(&run.job_url, &run.goal).await?;
    let mut last_error = None;

    while let Some(frame) = stream.next().await {
        let event = match frame? {
            AgentFrame::Event(event) => event,
            AgentFrame::Malformed { reason, .. } => {
                tracing::debug!(application_id = %run.application_id, reason = %reason, "Ignoring malformed apply event");
                continue;
            }
        };

        match &event.kind {
            UpstreamEventKind::StreamingUrl { url } => {
                if let Err(e) = recorder.set_streaming_url(&run.application_id, url).await {
                    tracing::warn!(application_id = %run.application_id, error = %e, "Failed to store streaming url");
                }
            }
            UpstreamEventKind::Error { message } => last_error = Some(message.clone()),
            _ => {}
        }

        sink.emit(SessionEvent::AppProgress {
            job_index: run.job_index,
            event: event.raw.clone(),
        })
        .await;

        if !event.is_complete() {
            continue;
        }

        let success = event.is_success();
        let result = event.result().cloned().unwrap_or(Value::Null);

        // Only reported as done once the terminal status is stored.
        recorder.mark_terminal(&run.application_id, success, &result).await?;

        tracing::info!(application_id = %run.application_id, job_index = run.job_index, success, "Application run finished");

        sink.emit(SessionEvent::AppDone {
            job_index: run.job_index,
            success,
            result: result.clone(),
        })
        .await;

        return Ok(ApplyOutcome { success, result });
    }

    Err(RunError::stream_ended(last_error))
}

/// Drive a standalone application whose record was just created.
///
/// Emits `JOB_STARTED` first and `ERROR` if the run fails.
pub async fn run_single_application(
    source: &dyn EventSource,
    recorder: &OutcomeRecorder,
    sink: &EventSink,
    run: ApplyRun,
) -> Option<ApplyOutcome> {
    sink.emit(SessionEvent::JobStarted {
        job_id: run.application_id.clone(),
    })
    .await;

    match drive_application(source, recorder, sink, &run).await {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            sink.emit(SessionEvent::Error {
                message: err.to_string(),
            })
            .await;
            None
        }
    }
}
