//! Postings discovered by search runs.

use jobfish_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiscoveredJob {
    pub id: RecordId,
    pub search_id: RecordId,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub application_url: Option<String>,
    pub board: String,
    pub external_id: Option<String>,
    pub created_at: Timestamp,
}

/// Query parameters for `GET /api/jobs`.
#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    /// Maximum number of results. Defaults to 50, capped at 200.
    pub limit: Option<i64>,
}
