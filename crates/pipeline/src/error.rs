use jobfish_agent::AgentError;

/// Errors from the outcome recorder.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    /// An application record with this id already exists.
    #[error("Application {0} already exists")]
    DuplicateId(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Why an agent run did not produce a usable terminal event.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// The agent closed the stream before sending `COMPLETE`.
    #[error("Agent stream ended without a COMPLETE event")]
    Incomplete,

    /// The agent sent `ERROR` and closed the stream without `COMPLETE`.
    #[error("Agent reported an error: {0}")]
    Reported(String),

    /// The terminal outcome could not be stored.
    #[error("Failed to record outcome: {0}")]
    Record(#[from] RecorderError),

    /// The search finished with a status other than `COMPLETED`.
    #[error("Search finished with status {0}")]
    Unsuccessful(String),
}

impl RunError {
    /// Error for a stream that closed before `COMPLETE`, carrying the last
    /// agent-reported error when there was one.
    pub fn stream_ended(last_error: Option<String>) -> Self {
        last_error.map_or(Self::Incomplete, Self::Reported)
    }
}
