//! Application lifecycle status, stored as lowercase `TEXT`.

use serde::{Deserialize, Serialize};

/// Lifecycle of an [`Application`](super::application::Application).
///
/// `Pending` and `Running` are the only non-terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Error,
}

impl ApplicationStatus {
    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Error => "error",
        }
    }

    /// Whether the application run has finished.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Error)
    }

    /// Terminal status for a run that reached its `COMPLETE` event.
    pub fn from_outcome(success: bool) -> Self {
        if success {
            Self::Completed
        } else {
            Self::Failed
        }
    }
}
