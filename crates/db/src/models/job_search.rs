//! Search runs.

use jobfish_core::types::{RecordId, Timestamp};
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `job_searches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobSearch {
    pub id: RecordId,
    pub board: String,
    /// Comma-joined job titles searched for.
    pub query: String,
    pub result_count: i64,
    /// Raw result entries as returned by the agent.
    pub results: Json<Value>,
    pub created_at: Timestamp,
}
