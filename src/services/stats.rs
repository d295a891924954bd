//! Reviewer statistics.
//!
//! The assignment count is an aggregate over the reviewer rows, recomputed on
//! every request rather than persisted.

use sqlx::PgPool;
use thiserror::Error;

use crate::models::ReviewerStats;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Service computing per-reviewer assignment counts
#[derive(Debug, Clone)]
pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All users with the number of pull requests currently assigned to them,
    /// busiest first, ties broken by name.
    pub async fn reviewer_stats(&self) -> Result<Vec<ReviewerStats>, StatsError> {
        let stats = sqlx::query_as::<_, ReviewerStats>(
            r#"
            SELECT u.id AS user_id, u.name AS username,
                   COUNT(prr.pull_request_id) AS assigned_count
            FROM users u
            LEFT JOIN pull_request_reviewers prr ON prr.reviewer_id = u.id
            GROUP BY u.id, u.name
            ORDER BY assigned_count DESC, u.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stats)
    }
}
