//! Team Service
//!
//! Creates teams and serves the team membership view. Membership is
//! denormalized onto the user rows, so reading a team recomputes the member
//! list from `users.team_name` instead of a stored aggregate.

use sqlx::{PgPool, Row};
use thiserror::Error;

use crate::models::{Team, TeamMember};

/// Errors that can occur during team operations
#[derive(Debug, Error)]
pub enum TeamError {
    #[error("Team not found: {0}")]
    NotFound(String),

    #[error("Team already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid team: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Service for managing teams
#[derive(Debug, Clone)]
pub struct TeamService {
    pool: PgPool,
}

impl TeamService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a team together with its members.
    ///
    /// The team row and every member upsert commit as one transaction. Members
    /// that already exist are rebound to this team; a duplicate team name
    /// aborts the whole unit with [`TeamError::AlreadyExists`].
    pub async fn add(&self, team: &Team) -> Result<Team, TeamError> {
        if team.name.is_empty() {
            return Err(TeamError::Validation("team_name is required".to_string()));
        }
        if team.members.is_empty() {
            return Err(TeamError::Validation(
                "team must contain at least one member".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query("INSERT INTO teams (name) VALUES ($1)")
            .bind(&team.name)
            .execute(&mut *tx)
            .await;

        if let Err(e) = inserted {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return Err(TeamError::AlreadyExists(team.name.clone()));
                }
            }
            return Err(e.into());
        }

        for member in &team.members {
            sqlx::query(
                r#"
                INSERT INTO users (id, name, is_active, team_name)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO UPDATE
                SET name = excluded.name,
                    is_active = excluded.is_active,
                    team_name = excluded.team_name
                "#,
            )
            .bind(&member.id)
            .bind(&member.name)
            .bind(member.is_active)
            .bind(&team.name)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(team = %team.name, members = team.members.len(), "team created");

        Ok(team.clone())
    }

    /// Fetch a team and its current members with live active flags.
    pub async fn get(&self, name: &str) -> Result<Team, TeamError> {
        if name.is_empty() {
            return Err(TeamError::Validation("team_name is required".to_string()));
        }

        let rows = sqlx::query(
            r#"
            SELECT id, name, is_active
            FROM users
            WHERE team_name = $1
            ORDER BY id
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Err(TeamError::NotFound(name.to_string()));
        }

        let members = rows
            .iter()
            .map(|row| TeamMember {
                id: row.get("id"),
                name: row.get("name"),
                is_active: row.get("is_active"),
            })
            .collect();

        Ok(Team {
            name: name.to_string(),
            members,
        })
    }
}
