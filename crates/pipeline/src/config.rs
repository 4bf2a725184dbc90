use std::time::Duration;

/// Orchestrator settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Pause between consecutive apply attempts.
    pub apply_pause_ms: u64,
    /// Capacity of the outbound event channel per session.
    pub channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            apply_pause_ms: 2000,
            channel_capacity: 64,
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `SESSION_APPLY_PAUSE_MS`   | `2000`  |
    /// | `SESSION_CHANNEL_CAPACITY` | `64`    |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let apply_pause_ms: u64 = std::env::var("SESSION_APPLY_PAUSE_MS")
            .map(|v| v.parse().expect("SESSION_APPLY_PAUSE_MS must be a valid u64"))
            .unwrap_or(defaults.apply_pause_ms);

        let channel_capacity: usize = std::env::var("SESSION_CHANNEL_CAPACITY")
            .map(|v| v.parse().expect("SESSION_CHANNEL_CAPACITY must be a valid usize"))
            .unwrap_or(defaults.channel_capacity);

        Self {
            apply_pause_ms,
            channel_capacity: channel_capacity.max(1),
        }
    }

    pub fn apply_pause(&self) -> Duration {
        Duration::from_millis(self.apply_pause_ms)
    }
}
