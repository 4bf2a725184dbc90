//! Repository for the `jobs` table (postings discovered by searches).

use chrono::Utc;
use jobfish_core::candidates::JobCandidate;
use jobfish_core::types::new_id;
use sqlx::SqliteConnection;

use crate::models::job::{DiscoveredJob, JobListQuery};
use crate::{clamp_limit, DbPool};

const COLUMNS: &str = "\
    id, search_id, title, company, location, application_url, board, \
    external_id, created_at";

const DEFAULT_LIMIT: i64 = 50;

const MAX_LIMIT: i64 = 200;

/// Provides persistence for discovered postings.
pub struct JobRepo;

impl JobRepo {
    /// Insert every candidate of one search on `conn`.
    ///
    /// Candidates without a board are stored under `board`.
    pub async fn insert_many(
        conn: &mut SqliteConnection,
        search_id: &str,
        board: &str,
        candidates: &[JobCandidate],
    ) -> Result<u64, sqlx::Error> {
        let now = Utc::now();
        let mut inserted = 0;

        for candidate in candidates {
            let result = sqlx::query(
                "INSERT INTO jobs \
                 (id, search_id, title, company, location, application_url, board, external_id, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(new_id())
            .bind(search_id)
            .bind(&candidate.title)
            .bind(&candidate.company)
            .bind(&candidate.location)
            .bind(&candidate.application_url)
            .bind(candidate.board.as_deref().unwrap_or(board))
            .bind(&candidate.external_id)
            .bind(now)
            .execute(&mut *conn)
            .await?;
            inserted += result.rows_affected();
        }

        Ok(inserted)
    }

    /// List discovered postings, newest first.
    pub async fn list(
        pool: &DbPool,
        params: &JobListQuery,
    ) -> Result<Vec<DiscoveredJob>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let query = format!(
            "SELECT {COLUMNS} FROM jobs ORDER BY created_at DESC, rowid DESC LIMIT ?"
        );
        sqlx::query_as::<_, DiscoveredJob>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List the postings found by one search, in discovery order.
    pub async fn list_by_search(
        pool: &DbPool,
        search_id: &str,
    ) -> Result<Vec<DiscoveredJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE search_id = ? ORDER BY rowid ASC");
        sqlx::query_as::<_, DiscoveredJob>(&query)
            .bind(search_id)
            .fetch_all(pool)
            .await
    }
}
