//! Offline replay of a canned agent run.
//!
//! Used when `AGENT_MOCK_MODE` is on so the service can be exercised
//! end to end without an API key. The final `COMPLETE` payload carries both
//! a `jobs` list and an application status so the same run answers search
//! and apply goals.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde_json::{json, Value};

use crate::messages::parse_value;
use crate::source::{AgentFrame, EventStream};

/// Number of progress steps in the canned run.
pub const MOCK_PROGRESS_STEPS: usize = 3;

/// Raw events of the canned run, in order.
pub fn mock_events(url: &str) -> Vec<Value> {
    let run_id = uuid::Uuid::new_v4().to_string();
    let host = url
        .split("://")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .unwrap_or("example.com");

    let mut events = vec![
        json!({"type": "STARTED", "runId": run_id}),
        json!({"type": "STREAMING_URL", "streamingUrl": format!("https://mock.agent.local/live/{run_id}")}),
    ];
    let purposes = ["Opening page", "Reading listings", "Filling in details"];
    events.extend(
        purposes
            .iter()
            .take(MOCK_PROGRESS_STEPS)
            .map(|p| json!({"type": "PROGRESS", "purpose": p})),
    );
    events.push(json!({
        "type": "COMPLETE",
        "status": "COMPLETED",
        "resultJson": {
            "jobs": [
                {
                    "title": "Software Engineer",
                    "company": "Mock Labs",
                    "location": "Remote",
                    "application_url": format!("https://{host}/jobs/mock-1"),
                    "description": "Build services in a small team.",
                    "posted_date": "today"
                },
                {
                    "title": "Backend Engineer",
                    "company": "Example Corp",
                    "location": "Remote",
                    "application_url": format!("https://{host}/jobs/mock-2"),
                    "description": "Own the API layer.",
                    "posted_date": "yesterday"
                }
            ],
            "success": true,
            "confirmation_id": format!("MOCK-{}", &run_id[..8]),
            "message": "Mock run completed"
        }
    }));
    events
}

/// Replay [`mock_events`] with `step` between consecutive events.
pub fn mock_stream(url: &str, step: Duration) -> EventStream {
    let events = mock_events(url);
    stream::iter(events.into_iter().enumerate())
        .then(move |(i, raw)| async move {
            if i > 0 && !step.is_zero() {
                tokio::time::sleep(step).await;
            }
            let frame = match parse_value(raw) {
                Ok(event) => AgentFrame::Event(event),
                Err(err) => AgentFrame::Malformed {
                    line: String::new(),
                    reason: err.0,
                },
            };
            Ok(frame)
        })
        .boxed()
}
