//! Pull Request Service
//!
//! The reviewer assignment engine: creates pull requests with automatically
//! chosen reviewers, merges them, and swaps reviewers 1-for-1 on demand.
//!
//! Every multi-row write commits as a single transaction. Reassignment is the
//! correctness-critical path: the substitution is a conditional update keyed
//! on `(pull_request_id, reviewer_id)`, so of two concurrent reassignments of
//! the same reviewer exactly one wins and the loser observes `NotAssigned`.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use thiserror::Error;

use crate::models::{PrStatus, PullRequest};
use crate::services::selector;
use crate::services::team::{TeamError, TeamService};
use crate::services::user::{UserError, UserService};

/// Errors that can occur during pull request operations
#[derive(Debug, Error)]
pub enum PullRequestError {
    #[error("Pull request not found: {0}")]
    PrNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Pull request already exists: {0}")]
    PrExists(String),

    #[error("Pull request is merged: {0}")]
    AlreadyMerged(String),

    #[error("Reviewer {0} is not assigned to this pull request")]
    NotAssigned(String),

    #[error("No active replacement candidate in the team")]
    NoCandidate,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<UserError> for PullRequestError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => Self::UserNotFound(id),
            UserError::Validation(msg) => Self::Validation(msg),
            UserError::Database(e) => Self::Database(e),
        }
    }
}

impl From<TeamError> for PullRequestError {
    fn from(err: TeamError) -> Self {
        match err {
            TeamError::NotFound(name) => Self::TeamNotFound(name),
            TeamError::AlreadyExists(name) => Self::Validation(format!("team exists: {name}")),
            TeamError::Validation(msg) => Self::Validation(msg),
            TeamError::Database(e) => Self::Database(e),
        }
    }
}

/// Service for managing pull requests and their reviewer assignments
#[derive(Debug, Clone)]
pub struct PullRequestService {
    pool: PgPool,
    users: UserService,
    teams: TeamService,
}

impl PullRequestService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserService::new(pool.clone()),
            teams: TeamService::new(pool.clone()),
            pool,
        }
    }

    /// Create a pull request and assign up to two reviewers from the author's
    /// team.
    ///
    /// The pull request row and its reviewer rows insert atomically. ID
    /// uniqueness is enforced by the primary key, not an application-level
    /// pre-check, so two racing creates on the same ID resolve to one success
    /// and one [`PullRequestError::PrExists`].
    pub async fn create(
        &self,
        id: &str,
        name: &str,
        author_id: &str,
    ) -> Result<PullRequest, PullRequestError> {
        if id.is_empty() || name.is_empty() || author_id.is_empty() {
            return Err(PullRequestError::Validation(
                "pull_request_id, pull_request_name and author_id are required".to_string(),
            ));
        }

        let author = self.users.get_by_id(author_id).await?;
        let team_name = author.team_name.ok_or_else(|| {
            PullRequestError::Validation(format!("author {author_id} has no team"))
        })?;

        let team = self.teams.get(&team_name).await?;
        let reviewers = selector::pick_for_creation(&team, author_id, &mut rand::thread_rng());

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO pull_requests (id, name, author_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(author_id)
        .bind(PrStatus::Open)
        .fetch_one(&mut *tx)
        .await;

        let created_at = match inserted {
            Ok(row) => row.get("created_at"),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(PullRequestError::PrExists(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        for reviewer_id in &reviewers {
            sqlx::query(
                "INSERT INTO pull_request_reviewers (pull_request_id, reviewer_id) VALUES ($1, $2)",
            )
            .bind(id)
            .bind(reviewer_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(pr = id, reviewers = ?reviewers, "pull request created");

        Ok(PullRequest {
            pull_request_id: id.to_string(),
            pull_request_name: name.to_string(),
            author_id: author_id.to_string(),
            status: PrStatus::Open,
            assigned_reviewers: reviewers,
            created_at,
            merged_at: None,
        })
    }

    /// Merge a pull request.
    ///
    /// Idempotent: the merge timestamp is set only if currently unset, so a
    /// second merge succeeds and keeps the first timestamp.
    pub async fn merge(&self, id: &str) -> Result<PullRequest, PullRequestError> {
        if id.is_empty() {
            return Err(PullRequestError::Validation(
                "pull_request_id is required".to_string(),
            ));
        }

        let row = sqlx::query(
            r#"
            UPDATE pull_requests
            SET status = 'MERGED',
                merged_at = COALESCE(merged_at, now())
            WHERE id = $1
            RETURNING id, name, author_id, status, created_at, merged_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| PullRequestError::PrNotFound(id.to_string()))?;
        let mut pr = pr_from_row(&row);
        pr.assigned_reviewers = sqlx::query_scalar(
            r#"
            SELECT reviewer_id
            FROM pull_request_reviewers
            WHERE pull_request_id = $1
            ORDER BY reviewer_id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        tracing::info!(pr = id, "pull request merged");

        Ok(pr)
    }

    /// Replace one assigned reviewer with another member of their team.
    ///
    /// The in-memory assignment check can go stale under concurrency, so the
    /// conditional update re-verifies it at commit time: zero affected rows
    /// means another caller already swapped that reviewer out.
    pub async fn reassign(
        &self,
        pr_id: &str,
        old_user_id: &str,
    ) -> Result<(PullRequest, String), PullRequestError> {
        if pr_id.is_empty() || old_user_id.is_empty() {
            return Err(PullRequestError::Validation(
                "pull_request_id and old_user_id are required".to_string(),
            ));
        }

        let pr = self
            .get_by_id(pr_id)
            .await?
            .ok_or_else(|| PullRequestError::PrNotFound(pr_id.to_string()))?;

        if pr.status == PrStatus::Merged {
            return Err(PullRequestError::AlreadyMerged(pr_id.to_string()));
        }

        if !pr.assigned_reviewers.iter().any(|r| r == old_user_id) {
            return Err(PullRequestError::NotAssigned(old_user_id.to_string()));
        }

        let old_reviewer = self.users.get_by_id(old_user_id).await?;
        let team_name = old_reviewer.team_name.ok_or_else(|| {
            PullRequestError::Validation(format!("reviewer {old_user_id} has no team"))
        })?;

        let team = self.teams.get(&team_name).await?;
        let new_reviewer_id = selector::pick_replacement(
            &team,
            &pr.author_id,
            &pr.assigned_reviewers,
            old_user_id,
            &mut rand::thread_rng(),
        )
        .ok_or(PullRequestError::NoCandidate)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE pull_request_reviewers
            SET reviewer_id = $3
            WHERE pull_request_id = $1 AND reviewer_id = $2
            "#,
        )
        .bind(pr_id)
        .bind(old_user_id)
        .bind(&new_reviewer_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Lost the race: someone else replaced this reviewer after our
            // read. Dropping the transaction rolls it back.
            return Err(PullRequestError::NotAssigned(old_user_id.to_string()));
        }

        // Read back inside the same transaction so the returned state cannot
        // already be advanced by a third writer.
        let updated = self.fetch_in_tx(&mut tx, pr_id).await?;

        tx.commit().await?;

        tracing::info!(
            pr = pr_id,
            old = old_user_id,
            new = %new_reviewer_id,
            "reviewer reassigned"
        );

        Ok((updated, new_reviewer_id))
    }

    /// Fetch a pull request with its reviewer set, `None` if absent.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<PullRequest>, PullRequestError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, author_id, status, created_at, merged_at
            FROM pull_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut pr = pr_from_row(&row);
        pr.assigned_reviewers = sqlx::query_scalar(
            r#"
            SELECT reviewer_id
            FROM pull_request_reviewers
            WHERE pull_request_id = $1
            ORDER BY reviewer_id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(pr))
    }

    async fn fetch_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: &str,
    ) -> Result<PullRequest, PullRequestError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, author_id, status, created_at, merged_at
            FROM pull_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&mut **tx)
        .await?;

        let mut pr = pr_from_row(&row);
        pr.assigned_reviewers = sqlx::query_scalar(
            r#"
            SELECT reviewer_id
            FROM pull_request_reviewers
            WHERE pull_request_id = $1
            ORDER BY reviewer_id
            "#,
        )
        .bind(id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(pr)
    }
}

fn pr_from_row(row: &PgRow) -> PullRequest {
    PullRequest {
        pull_request_id: row.get("id"),
        pull_request_name: row.get("name"),
        author_id: row.get("author_id"),
        status: row.get("status"),
        assigned_reviewers: Vec::new(),
        created_at: row.get("created_at"),
        merged_at: row.get("merged_at"),
    }
}
