//! Application records: one row per apply run.

use jobfish_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

use super::status::ApplicationStatus;

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: RecordId,
    pub session_id: Option<String>,
    pub job_url: String,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub applicant: String,
    pub status: ApplicationStatus,
    /// Live browser view assigned by the agent, when one was announced.
    pub streaming_url: Option<String>,
    pub result: Option<Json<Value>>,
    /// Present iff `status` is `error`.
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an application row when an apply run starts.
#[derive(Debug, Clone)]
pub struct CreateApplication {
    pub id: RecordId,
    pub session_id: Option<String>,
    pub job_url: String,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub applicant: String,
}

/// Query parameters for `GET /api/applications`.
#[derive(Debug, Default, Deserialize)]
pub struct ApplicationListQuery {
    /// Maximum number of results. Defaults to 50, capped at 200.
    pub limit: Option<i64>,
}
