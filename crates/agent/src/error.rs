/// Errors from opening or reading an agent run.
///
/// Malformed individual frames are not errors; they surface as
/// [`AgentFrame::Malformed`](crate::AgentFrame::Malformed) items.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// No API key is configured and mock mode is off.
    #[error("Agent not configured: {0}")]
    Configuration(String),

    /// The agent answered the initial request with a non-2xx status.
    #[error("Agent API error ({status}): {body}")]
    UpstreamHttp {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The HTTP request could not be sent (DNS, TLS, connect, client build).
    #[error("Agent request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The event stream broke after it was opened.
    #[error("Agent stream interrupted: {0}")]
    Transport(String),
}
