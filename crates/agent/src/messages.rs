//! Agent event types and parser.
//!
//! The agent sends one JSON object per `data:` line with the shape
//! `{"type": "<KIND>", ...}` (some deployments use `event` instead of
//! `type`). Known kinds are interpreted; unknown kinds are kept as
//! [`UpstreamEventKind::Other`] so they can still be relayed.

use serde_json::Value;

/// `COMPLETE.status` value that marks a successful run.
pub const STATUS_COMPLETED: &str = "COMPLETED";

/// Interpreted view of one agent event.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamEventKind {
    /// The run was accepted.
    Started { run_id: Option<String> },

    /// The agent assigned a live browser view for this run.
    StreamingUrl { url: String },

    /// Intermediate progress.
    Progress { message: Option<String> },

    /// Terminal event. `status` is the raw status string if present.
    Complete { status: Option<String>, result: Value },

    /// The agent reported an error. Not terminal by itself.
    Error { message: String },

    /// Keep-alive.
    Heartbeat,

    /// Any other kind, relayed without interpretation.
    Other { kind: String },
}

/// One agent event: its interpretation plus the original JSON for relaying.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamEvent {
    pub kind: UpstreamEventKind,
    pub raw: Value,
}

impl UpstreamEvent {
    /// Whether this is a `COMPLETE` event (successful or not).
    pub fn is_complete(&self) -> bool {
        matches!(self.kind, UpstreamEventKind::Complete { .. })
    }

    /// Whether this is a `COMPLETE` event with status `COMPLETED`.
    ///
    /// A missing or unrecognized status counts as failure.
    pub fn is_success(&self) -> bool {
        matches!(
            &self.kind,
            UpstreamEventKind::Complete { status: Some(status), .. }
                if status.eq_ignore_ascii_case(STATUS_COMPLETED)
        )
    }

    /// Result payload of a `COMPLETE` event.
    pub fn result(&self) -> Option<&Value> {
        match &self.kind {
            UpstreamEventKind::Complete { result, .. } => Some(result),
            _ => None,
        }
    }
}

/// Why a `data:` line could not be turned into an event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed agent event: {0}")]
pub struct MalformedEvent(pub String);

/// Parse the payload of one `data:` line.
pub fn parse_event(data: &str) -> Result<UpstreamEvent, MalformedEvent> {
    let value: Value =
        serde_json::from_str(data).map_err(|e| MalformedEvent(e.to_string()))?;
    parse_value(value)
}

/// Interpret an already-decoded JSON event.
///
/// Only JSON objects are events; any other JSON value is malformed.
pub fn parse_value(raw: Value) -> Result<UpstreamEvent, MalformedEvent> {
    let obj = raw
        .as_object()
        .ok_or_else(|| MalformedEvent("event is not a JSON object".into()))?;

    let text = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_str))
            .map(str::to_string)
    };

    let kind_name = text(&["type", "event"]).unwrap_or_default();

    let kind = match kind_name.to_ascii_uppercase().as_str() {
        "STARTED" => UpstreamEventKind::Started {
            run_id: text(&["runId", "run_id"]),
        },
        "STREAMING_URL" => match text(&["streamingUrl", "streaming_url", "url"]) {
            Some(url) => UpstreamEventKind::StreamingUrl { url },
            None => UpstreamEventKind::Other { kind: kind_name },
        },
        "PROGRESS" => UpstreamEventKind::Progress {
            message: text(&["purpose", "message"]),
        },
        "COMPLETE" => UpstreamEventKind::Complete {
            status: text(&["status"]),
            result: decode_result(
                ["resultJson", "result_json", "result"]
                    .iter()
                    .find_map(|k| obj.get(*k)),
            ),
        },
        "ERROR" => UpstreamEventKind::Error {
            message: text(&["message", "error"]).unwrap_or_else(|| "unknown agent error".into()),
        },
        "HEARTBEAT" => UpstreamEventKind::Heartbeat,
        _ => UpstreamEventKind::Other { kind: kind_name },
    };

    Ok(UpstreamEvent { kind, raw })
}

/// Normalize a `COMPLETE` result payload.
///
/// A string that contains JSON is decoded; any other string is kept as a
/// string. A missing payload becomes `null`.
pub fn decode_result(result: Option<&Value>) -> Value {
    match result {
        None => Value::Null,
        Some(Value::String(s)) => {
            serde_json::from_str(s.trim()).unwrap_or_else(|_| Value::String(s.clone()))
        }
        Some(other) => other.clone(),
    }
}
