//! PR Reviewer Assignment Service
//!
//! Assigns and re-assigns code-review responsibility for pull requests across
//! teams of users, backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::AppError;

pub use models::{PrStatus, PullRequest, ReviewerStats, Team, TeamMember, User};
pub use services::{
    PullRequestError, PullRequestService, StatsService, TeamError, TeamService, UserError,
    UserService,
};

/// Application state shared across handlers
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Config,
}
