//! Repository for the `job_searches` table.

use chrono::Utc;
use jobfish_core::types::new_id;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::SqliteConnection;

use crate::models::job_search::JobSearch;
use crate::DbPool;

const COLUMNS: &str = "id, board, query, result_count, results, created_at";

/// Provides persistence for search runs.
pub struct JobSearchRepo;

impl JobSearchRepo {
    /// Record a finished search run. Returns the new row.
    ///
    /// Takes a connection so the caller can group it with the job inserts
    /// in one transaction.
    pub async fn create(
        conn: &mut SqliteConnection,
        board: &str,
        query: &str,
        results: &[Value],
    ) -> Result<JobSearch, sqlx::Error> {
        let sql = format!(
            "INSERT INTO job_searches (id, board, query, result_count, results, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobSearch>(&sql)
            .bind(new_id())
            .bind(board)
            .bind(query)
            .bind(results.len() as i64)
            .bind(Json(results))
            .bind(Utc::now())
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a search run by id.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<JobSearch>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM job_searches WHERE id = ?");
        sqlx::query_as::<_, JobSearch>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
