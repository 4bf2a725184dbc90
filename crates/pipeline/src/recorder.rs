//! Durable record of application and search outcomes.

use jobfish_core::candidates::JobCandidate;
use jobfish_db::models::application::{Application, ApplicationListQuery, CreateApplication};
use jobfish_db::models::job_search::JobSearch;
use jobfish_db::models::status::ApplicationStatus;
use jobfish_db::repositories::{ApplicationRepo, JobRepo, JobSearchRepo};
use jobfish_db::DbPool;
use serde_json::Value;

use crate::error::RecorderError;

/// Records application lifecycles and finished searches.
///
/// Every application created here starts `running` and is moved to
/// exactly one terminal status by the orchestrator.
#[derive(Debug, Clone)]
pub struct OutcomeRecorder {
    pool: DbPool,
}

impl OutcomeRecorder {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new application in `running` state.
    pub async fn create_pending(&self, input: &CreateApplication) -> Result<Application, RecorderError> {
        ApplicationRepo::create_running(&self.pool, input)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_unique_violation() => RecorderError::DuplicateId(input.id.clone()),
                _ => RecorderError::Database(e),
            })
    }

    /// Store `completed` or `failed` with the agent's result.
    ///
    /// Overwrites any earlier terminal status.
    pub async fn mark_terminal(&self, id: &str, success: bool, result: &Value) -> Result<(), RecorderError> {
        let status = ApplicationStatus::from_outcome(success);
        if !ApplicationRepo::mark_terminal(&self.pool, id, status, result).await? {
            tracing::warn!(application_id = %id, "mark_terminal on unknown application");
        }
        Ok(())
    }

    /// Store the `error` status with its message.
    pub async fn mark_error(&self, id: &str, message: &str) -> Result<(), RecorderError> {
        if !ApplicationRepo::mark_error(&self.pool, id, message).await? {
            tracing::warn!(application_id = %id, "mark_error on unknown application");
        }
        Ok(())
    }

    pub async fn set_streaming_url(&self, id: &str, url: &str) -> Result<(), RecorderError> {
        ApplicationRepo::set_streaming_url(&self.pool, id, url).await?;
        Ok(())
    }

    /// Applications, newest first.
    pub async fn list(&self, params: &ApplicationListQuery) -> Result<Vec<Application>, RecorderError> {
        Ok(ApplicationRepo::list(&self.pool, params).await?)
    }

    /// Persist a finished search and its candidates in one transaction.
    pub async fn record_search(
        &self,
        board: &str,
        query: &str,
        raw_results: &[Value],
        candidates: &[JobCandidate],
    ) -> Result<JobSearch, RecorderError> {
        let mut tx = self.pool.begin().await?;
        let search = JobSearchRepo::create(&mut tx, board, query, raw_results).await?;
        let inserted = JobRepo::insert_many(&mut tx, &search.id, board, candidates).await?;
        tx.commit().await?;
        tracing::debug!(search_id = %search.id, inserted, "Recorded search results");
        Ok(search)
    }
}
