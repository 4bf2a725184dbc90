use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::AgentError;
use crate::messages::UpstreamEvent;

/// One item of an agent run.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentFrame {
    /// A parsed event.
    Event(UpstreamEvent),

    /// A `data:` line whose payload was not a JSON object. The stream
    /// continues after it.
    Malformed { line: String, reason: String },
}

/// Lazy, single-pass sequence of frames from one agent run.
///
/// An `Err` item means the transport failed; no items follow it.
pub type EventStream = BoxStream<'static, Result<AgentFrame, AgentError>>;

/// Something that can start an agent run and stream its events.
///
/// Implemented by [`AgentClient`](crate::AgentClient) for the real agent
/// and by scripted fakes in tests.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Start a run against `url` with the natural-language `goal`.
    ///
    /// Errors opening the run (unconfigured client, non-2xx answer,
    /// connect failure) are returned here, before any frame is produced.
    async fn run(&self, url: &str, goal: &str) -> Result<EventStream, AgentError>;
}
