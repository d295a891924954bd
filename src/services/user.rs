//! User Service
//!
//! Looks up users, toggles the active flag, and lists the pull requests a
//! user is currently reviewing.

use sqlx::{PgPool, Row};
use thiserror::Error;

use crate::models::{PrStatus, PullRequest, User};

/// Errors that can occur during user operations
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Service for managing users
#[derive(Debug, Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, user_id: &str) -> Result<User, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, is_active, team_name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| UserError::NotFound(user_id.to_string()))?;

        Ok(User {
            id: row.get("id"),
            name: row.get("name"),
            is_active: row.get("is_active"),
            team_name: row.get("team_name"),
        })
    }

    /// Set the active flag. Inactive users stay on their team but stop being
    /// eligible for new assignments.
    pub async fn set_is_active(&self, user_id: &str, is_active: bool) -> Result<User, UserError> {
        if user_id.is_empty() {
            return Err(UserError::Validation("user_id is required".to_string()));
        }

        let mut user = self.get_by_id(user_id).await?;

        sqlx::query("UPDATE users SET is_active = $2 WHERE id = $1")
            .bind(user_id)
            .bind(is_active)
            .execute(&self.pool)
            .await?;

        user.is_active = is_active;
        Ok(user)
    }

    /// Pull requests where the user is an assigned reviewer, newest first.
    pub async fn get_review(&self, user_id: &str) -> Result<Vec<PullRequest>, UserError> {
        if user_id.is_empty() {
            return Err(UserError::Validation("user_id is required".to_string()));
        }

        let rows = sqlx::query(
            r#"
            SELECT pr.id, pr.name, pr.author_id, pr.status, pr.created_at, pr.merged_at
            FROM pull_requests pr
            JOIN pull_request_reviewers r ON r.pull_request_id = pr.id
            WHERE r.reviewer_id = $1
            ORDER BY pr.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let result = rows
            .iter()
            .map(|row| PullRequest {
                pull_request_id: row.get("id"),
                pull_request_name: row.get("name"),
                author_id: row.get("author_id"),
                status: row.get::<PrStatus, _>("status"),
                assigned_reviewers: Vec::new(),
                created_at: row.get("created_at"),
                merged_at: row.get("merged_at"),
            })
            .collect();

        Ok(result)
    }
}
