//! HTTP client for the agent's run-and-stream endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::mock::mock_stream;
use crate::source::{EventSource, EventStream};
use crate::sse::decode_frames;

/// How runs are served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    /// Real agent calls with an API key.
    Live,
    /// Canned offline runs.
    Mock,
    /// No API key and mock mode off; every run fails with a configuration error.
    Unconfigured,
}

impl AgentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Mock => "mock",
            Self::Unconfigured => "unconfigured",
        }
    }
}

#[derive(Serialize)]
struct RunRequest<'a> {
    url: &'a str,
    goal: &'a str,
    proxy_config: ProxyConfig,
}

#[derive(Serialize)]
struct ProxyConfig {
    enabled: bool,
}

/// Client for the web-automation agent.
///
/// Cheap to clone; the inner [`reqwest::Client`] pools connections.
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: reqwest::Client,
    config: AgentConfig,
}

impl AgentClient {
    /// Build a client whose timeout bounds each whole run.
    pub fn new(config: AgentConfig) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn mode(&self) -> AgentMode {
        if self.config.mock_mode {
            AgentMode::Mock
        } else if self.config.api_key.is_some() {
            AgentMode::Live
        } else {
            AgentMode::Unconfigured
        }
    }

    /// Fail fast when runs cannot possibly succeed.
    pub fn ensure_configured(&self) -> Result<(), AgentError> {
        match self.mode() {
            AgentMode::Unconfigured => Err(AgentError::Configuration(
                "TINYFISH_API_KEY is not set".into(),
            )),
            _ => Ok(()),
        }
    }

    async fn open_live(&self, api_key: &str, url: &str, goal: &str) -> Result<EventStream, AgentError> {
        let body = RunRequest {
            url,
            goal,
            proxy_config: ProxyConfig {
                enabled: self.config.proxy_enabled,
            },
        };

        tracing::debug!(api_url = %self.config.api_url, target_url = %url, "Opening agent run");

        let response = self
            .client
            .post(&self.config.api_url)
            .header("X-API-Key", api_key)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(decode_frames(response.bytes_stream()))
    }

    /// Map a non-2xx response to [`AgentError::UpstreamHttp`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AgentError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), body = %body, "Agent rejected run");
        Err(AgentError::UpstreamHttp {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl EventSource for AgentClient {
    async fn run(&self, url: &str, goal: &str) -> Result<EventStream, AgentError> {
        if self.config.mock_mode {
            tracing::debug!(target_url = %url, "Replaying mock agent run");
            return Ok(mock_stream(
                url,
                Duration::from_millis(self.config.mock_step_ms),
            ));
        }

        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            AgentError::Configuration("TINYFISH_API_KEY is not set".into())
        })?;
        self.open_live(api_key, url, goal).await
    }
}
