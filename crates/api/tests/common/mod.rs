#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use futures::stream::{self, StreamExt};
use http_body_util::BodyExt;
use jobfish_agent::messages::parse_value;
use jobfish_agent::{AgentConfig, AgentError, AgentFrame, AgentMode, EventSource, EventStream};
use jobfish_pipeline::SessionConfig;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use jobfish_api::config::ServerConfig;
use jobfish_api::router::build_app_router;
use jobfish_api::state::AppState;

// ---------------------------------------------------------------------------
// Scripted agent
// ---------------------------------------------------------------------------

/// What one agent run should produce.
pub enum Script {
    Stream(Vec<Value>),
    Fail(AgentError),
}

/// Event source replaying one script per run, in order.
pub struct ScriptedSource {
    scripts: Mutex<VecDeque<Script>>,
}

impl ScriptedSource {
    pub fn new(scripts: Vec<Script>) -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(scripts.into()),
        })
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn run(&self, _url: &str, _goal: &str) -> Result<EventStream, AgentError> {
        match self.scripts.lock().unwrap().pop_front() {
            Some(Script::Stream(events)) => {
                let frames: Vec<Result<AgentFrame, AgentError>> = events
                    .into_iter()
                    .map(|raw| Ok(AgentFrame::Event(parse_value(raw).unwrap())))
                    .collect();
                Ok(stream::iter(frames).boxed())
            }
            Some(Script::Fail(err)) => Err(err),
            None => Err(AgentError::Transport("no script left".into())),
        }
    }
}

pub fn search_script(jobs: Value) -> Script {
    Script::Stream(vec![
        json!({"type": "STARTED"}),
        json!({"type": "COMPLETE", "status": "COMPLETED", "resultJson": jobs}),
    ])
}

pub fn apply_script(status: &str) -> Script {
    Script::Stream(vec![
        json!({"type": "STARTED"}),
        json!({"type": "PROGRESS", "purpose": "Filling form"}),
        json!({"type": "COMPLETE", "status": status, "resultJson": {"confirmation_id": "C-9"}}),
    ])
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        agent: AgentConfig::default(),
        session: SessionConfig {
            apply_pause_ms: 0,
            channel_capacity: 16,
        },
    }
}

/// Build the full application router over `pool` with a scripted agent.
pub fn build_test_app(pool: SqlitePool, source: Arc<ScriptedSource>) -> Router {
    build_test_app_with_mode(pool, source, AgentMode::Live)
}

pub fn build_test_app_with_mode(
    pool: SqlitePool,
    source: Arc<ScriptedSource>,
    mode: AgentMode,
) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone(), source, mode);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Read an SSE response to its end and parse every `data:` frame.
pub async fn sse_frames(response: Response<Body>) -> Vec<Value> {
    body_string(response)
        .await
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| serde_json::from_str(data.trim_start()).unwrap())
        .collect()
}

pub fn frame_types(frames: &[Value]) -> Vec<String> {
    frames
        .iter()
        .map(|f| f["type"].as_str().unwrap_or_default().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn profile_json() -> Value {
    json!({
        "full_name": "Sam Doe",
        "email": "sam@example.com",
        "phone": "+1 555 0100",
        "location": "Berlin",
        "years_experience": 5,
        "skills": ["Rust"],
        "summary": "Backend engineer.",
        "education": "BSc",
        "most_recent_role": "Engineer",
        "most_recent_company": "Acme"
    })
}

pub fn preferences_json(max_applications: u32) -> Value {
    json!({
        "job_titles": ["Engineer"],
        "locations": ["Remote"],
        "job_boards": ["lever"],
        "max_applications": max_applications
    })
}
