//! Client for the web-automation agent's run-and-stream endpoint.
//!
//! One call to [`EventSource::run`] opens one streaming POST and yields
//! the agent's server-sent events as a lazy [`EventStream`]. The crate
//! provides typed event parsing, an incremental SSE line decoder, the
//! reqwest-backed [`AgentClient`], and an offline mock mode that replays a
//! canned run.

pub mod client;
pub mod config;
pub mod error;
pub mod messages;
pub mod mock;
pub mod source;
pub mod sse;

pub use client::{AgentClient, AgentMode};
pub use config::AgentConfig;
pub use error::AgentError;
pub use messages::{UpstreamEvent, UpstreamEventKind};
pub use source::{AgentFrame, EventSource, EventStream};
