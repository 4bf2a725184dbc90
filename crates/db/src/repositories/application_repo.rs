//! Repository for the `applications` table.
//!
//! Terminal updates overwrite unconditionally: a second terminal write on
//! the same id replaces the first rather than failing.

use chrono::Utc;
use serde_json::Value;
use sqlx::types::Json;

use crate::models::application::{Application, ApplicationListQuery, CreateApplication};
use crate::models::status::ApplicationStatus;
use crate::{clamp_limit, DbPool};

/// Column list for `applications` queries.
const COLUMNS: &str = "\
    id, session_id, job_url, job_title, company, applicant, status, \
    streaming_url, result, error, created_at, updated_at";

/// Default page size for listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for listing.
const MAX_LIMIT: i64 = 200;

/// Provides persistence for application attempts.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application in `running` state.
    ///
    /// Fails with a unique-violation database error if the id exists.
    pub async fn create_running(
        pool: &DbPool,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO applications \
             (id, session_id, job_url, job_title, company, applicant, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(&input.id)
            .bind(&input.session_id)
            .bind(&input.job_url)
            .bind(&input.job_title)
            .bind(&input.company)
            .bind(&input.applicant)
            .bind(ApplicationStatus::Running)
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find an application by id.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = ?");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record a terminal `completed`/`failed` status with the agent's result.
    ///
    /// Returns `false` if no row has this id.
    pub async fn mark_terminal(
        pool: &DbPool,
        id: &str,
        status: ApplicationStatus,
        result: &Value,
    ) -> Result<bool, sqlx::Error> {
        let outcome = sqlx::query(
            "UPDATE applications SET status = ?, result = ?, error = NULL, updated_at = ? \
             WHERE id = ?",
        )
        .bind(status)
        .bind(Json(result))
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
        Ok(outcome.rows_affected() > 0)
    }

    /// Record the terminal `error` status with a message.
    ///
    /// Returns `false` if no row has this id.
    pub async fn mark_error(pool: &DbPool, id: &str, message: &str) -> Result<bool, sqlx::Error> {
        let outcome = sqlx::query(
            "UPDATE applications SET status = ?, error = ?, updated_at = ? WHERE id = ?",
        )
        .bind(ApplicationStatus::Error)
        .bind(message)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
        Ok(outcome.rows_affected() > 0)
    }

    /// Store the live-view URL the agent assigned to this run.
    pub async fn set_streaming_url(pool: &DbPool, id: &str, url: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE applications SET streaming_url = ?, updated_at = ? WHERE id = ?")
            .bind(url)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// List applications, newest first.
    pub async fn list(
        pool: &DbPool,
        params: &ApplicationListQuery,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let query = format!(
            "SELECT {COLUMNS} FROM applications \
             ORDER BY created_at DESC, rowid DESC \
             LIMIT ?"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
