use std::sync::Arc;

use jobfish_agent::{AgentMode, EventSource};
use jobfish_pipeline::OutcomeRecorder;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: jobfish_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Starts agent runs. The live client in production, a fake in tests.
    pub agent: Arc<dyn EventSource>,
    /// How `agent` serves runs, reported by `/health`.
    pub agent_mode: AgentMode,
    /// Persists application and search outcomes.
    pub recorder: OutcomeRecorder,
}

impl AppState {
    pub fn new(
        pool: jobfish_db::DbPool,
        config: ServerConfig,
        agent: Arc<dyn EventSource>,
        agent_mode: AgentMode,
    ) -> Self {
        Self {
            recorder: OutcomeRecorder::new(pool.clone()),
            pool,
            config: Arc::new(config),
            agent,
            agent_mode,
        }
    }
}
