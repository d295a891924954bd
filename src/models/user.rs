//! User, team, and reviewer-stats models.
//!
//! Team membership is denormalized onto the user row: a [`Team`] is a view
//! recomputed from the users sharing a `team_name`, not a stored aggregate.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user that can author pull requests and review them.
///
/// A user with no team is invalid as an author or reviewer candidate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    #[serde(rename = "user_id")]
    pub id: String,
    #[serde(rename = "username")]
    pub name: String,
    pub team_name: Option<String>,
    pub is_active: bool,
}

/// A team and its current members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "team_name")]
    pub name: String,
    pub members: Vec<TeamMember>,
}

/// A member entry inside a team payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(rename = "user_id")]
    pub id: String,
    #[serde(rename = "username")]
    pub name: String,
    pub is_active: bool,
}

/// Per-user reviewer assignment count, recomputed on demand.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReviewerStats {
    pub user_id: String,
    pub username: String,
    pub assigned_count: i64,
}

/// Request payload for toggling a user's active flag
#[derive(Debug, Clone, Deserialize)]
pub struct SetIsActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

/// Response payload for toggling a user's active flag
#[derive(Debug, Clone, Serialize)]
pub struct SetIsActiveResponse {
    pub user: User,
}

/// Response payload for the team creation endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TeamAddResponse {
    pub team: Team,
}

/// Response payload listing reviewer stats
#[derive(Debug, Clone, Serialize)]
pub struct ReviewerStatsResponse {
    pub items: Vec<ReviewerStats>,
}
