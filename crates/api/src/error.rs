use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jobfish_agent::AgentError;
use jobfish_core::error::CoreError;
use jobfish_pipeline::{RecorderError, RunError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for request validation plus the orchestrator and
/// database errors a handler can surface. Implements [`IntoResponse`] to
/// produce consistent `{error, code}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `jobfish_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An agent run failed or ended without a usable result.
    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Recorder(#[from] RecorderError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }

            // --- Agent runs ---
            AppError::Run(RunError::Agent(err)) => classify_agent_error(err),
            AppError::Run(RunError::Record(err)) => classify_recorder_error(err),
            AppError::Run(err) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string()),

            // --- Persistence ---
            AppError::Recorder(err) => classify_recorder_error(err),
            AppError::Database(err) => classify_sqlx_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify an agent error into an HTTP status, error code, and message.
///
/// - `Configuration` maps to 500 `AGENT_NOT_CONFIGURED`.
/// - Upstream rejections and transport failures map to 502 `UPSTREAM_ERROR`,
///   carrying the upstream status and body.
fn classify_agent_error(err: &AgentError) -> (StatusCode, &'static str, String) {
    match err {
        AgentError::Configuration(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "AGENT_NOT_CONFIGURED",
            msg.clone(),
        ),
        AgentError::UpstreamHttp { .. } | AgentError::Request(_) | AgentError::Transport(_) => {
            tracing::warn!(error = %err, "Agent call failed");
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
        }
    }
}

fn classify_recorder_error(err: &RecorderError) -> (StatusCode, &'static str, String) {
    match err {
        RecorderError::DuplicateId(id) => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Application {id} already exists"),
        ),
        RecorderError::Database(err) => classify_sqlx_error(err),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Duplicate value violates a unique constraint".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
