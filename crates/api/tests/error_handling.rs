//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly; no server or database is needed.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use jobfish_agent::AgentError;
use jobfish_api::error::AppError;
use jobfish_core::error::CoreError;
use jobfish_pipeline::{RecorderError, RunError};

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("job_url is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "job_url is required");
}

#[tokio::test]
async fn unconfigured_agent_returns_500_with_dedicated_code() {
    let err = AppError::Run(RunError::Agent(AgentError::Configuration(
        "TINYFISH_API_KEY is not set".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "AGENT_NOT_CONFIGURED");
}

#[tokio::test]
async fn upstream_rejection_returns_502_with_status_and_body() {
    let err = AppError::Run(RunError::Agent(AgentError::UpstreamHttp {
        status: 429,
        body: "rate limited".into(),
    }));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("429") && message.contains("rate limited"));
}

#[tokio::test]
async fn incomplete_run_returns_502() {
    let (status, json) = error_to_response(AppError::Run(RunError::Incomplete)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn duplicate_record_returns_409() {
    let err = AppError::Recorder(RecorderError::DuplicateId("abc".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn agent_reported_error_returns_502_with_its_message() {
    let err = AppError::Run(RunError::Reported("board unreachable".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_matches!(json["error"].as_str(), Some(message) if message.ends_with("board unreachable"));
}

#[tokio::test]
async fn unstored_outcome_is_a_sanitized_500() {
    let err = AppError::Run(RunError::Record(RecorderError::Database(sqlx::Error::PoolTimedOut)));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
