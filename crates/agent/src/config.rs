/// Default run-and-stream endpoint.
pub const DEFAULT_AGENT_API_URL: &str = "https://agent.tinyfish.ai/v1/automation/run-sse";

/// Agent client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// API key sent as `X-API-Key`. `None` means unconfigured.
    pub api_key: Option<String>,
    /// Run-and-stream endpoint URL.
    pub api_url: String,
    /// Upper bound for one run, body streaming included.
    pub timeout_secs: u64,
    /// Replay a canned run instead of calling the agent.
    pub mock_mode: bool,
    /// Delay between canned events in mock mode.
    pub mock_step_ms: u64,
    /// Ask the agent to route browsing through its proxy.
    pub proxy_enabled: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_AGENT_API_URL.to_string(),
            timeout_secs: 300,
            mock_mode: false,
            mock_step_ms: 400,
            proxy_enabled: true,
        }
    }
}

impl AgentConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                        |
    /// |-----------------------|--------------------------------|
    /// | `TINYFISH_API_KEY`    | unset                          |
    /// | `AGENT_API_URL`       | [`DEFAULT_AGENT_API_URL`]      |
    /// | `AGENT_TIMEOUT_SECS`  | `300`                          |
    /// | `AGENT_MOCK_MODE`     | `false`                        |
    /// | `AGENT_MOCK_STEP_MS`  | `400`                          |
    /// | `AGENT_PROXY_ENABLED` | `true`                         |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = std::env::var("TINYFISH_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let api_url = std::env::var("AGENT_API_URL").unwrap_or(defaults.api_url);

        let timeout_secs: u64 = std::env::var("AGENT_TIMEOUT_SECS")
            .map(|v| v.parse().expect("AGENT_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or(defaults.timeout_secs);

        let mock_step_ms: u64 = std::env::var("AGENT_MOCK_STEP_MS")
            .map(|v| v.parse().expect("AGENT_MOCK_STEP_MS must be a valid u64"))
            .unwrap_or(defaults.mock_step_ms);

        Self {
            api_key,
            api_url,
            timeout_secs,
            mock_mode: env_flag("AGENT_MOCK_MODE").unwrap_or(defaults.mock_mode),
            mock_step_ms,
            proxy_enabled: env_flag("AGENT_PROXY_ENABLED").unwrap_or(defaults.proxy_enabled),
        }
    }
}

/// Read a boolean flag (`1/true/yes/on` vs `0/false/no/off`).
fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    parse_flag(&value)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
