//! One search run: resolve the board, stream the agent, collect candidates.

use futures::StreamExt;
use jobfish_agent::{AgentFrame, EventSource, UpstreamEventKind};
use jobfish_core::candidates::{normalize_candidates, result_entries, JobCandidate};
use jobfish_core::goals::build_search_goal;
use jobfish_core::job_boards::{resolve_board, ResolvedBoard};
use jobfish_core::profile::JobPreferences;
use jobfish_core::session_events::SessionEvent;
use serde_json::Value;

use crate::error::RunError;
use crate::sink::EventSink;

/// Result of a successful search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub board: ResolvedBoard,
    /// Comma-joined titles searched for.
    pub query: String,
    /// Raw result entries as the agent returned them.
    pub raw_results: Vec<Value>,
    /// Normalized candidates in the agent's order, tagged with the board.
    pub candidates: Vec<JobCandidate>,
}

/// Run the search goal against the resolved board.
///
/// Every upstream event is relayed as `SEARCH_PROGRESS` when a sink is
/// given. The run succeeds only on a `COMPLETE` event with status
/// `COMPLETED`.
pub async fn run_search(
    source: &dyn EventSource,
    preferences: &JobPreferences,
    sink: Option<&EventSink>,
) -> Result<SearchOutcome, RunError> {
    let board = resolve_board(preferences);
    let goal = build_search_goal(preferences);

    tracing::info!(board = %board.name, url = board.url, "Starting job search");

    let mut stream = source.run(board.url, &goal).await?;
    let mut last_error = None;

    while let Some(frame) = stream.next().await {
        let event = match frame? {
            AgentFrame::Event(event) => event,
            AgentFrame::Malformed { reason, .. } => {
                tracing::debug!(reason = %reason, "Ignoring malformed search event");
                continue;
            }
        };

        if let Some(sink) = sink {
            sink.emit(SessionEvent::SearchProgress {
                event: event.raw.clone(),
            })
            .await;
        }

        if let UpstreamEventKind::Error { message } = &event.kind {
            last_error = Some(message.clone());
        }
        if !event.is_complete() {
            continue;
        }
        if !event.is_success() {
            let status = event.raw["status"].as_str().unwrap_or("UNKNOWN").to_string();
            return Err(RunError::Unsuccessful(status));
        }

        let result = event.result().cloned().unwrap_or(Value::Null);
        let raw_results = result_entries(&result).to_vec();
        let candidates = normalize_candidates(&result)
            .into_iter()
            .map(|c| c.with_board(&board.name))
            .collect::<Vec<_>>();

        tracing::info!(board = %board.name, count = candidates.len(), "Search completed");

        return Ok(SearchOutcome {
            query: preferences.job_titles.join(", "),
            board,
            raw_results,
            candidates,
        });
    }

    Err(RunError::stream_ended(last_error))
}
