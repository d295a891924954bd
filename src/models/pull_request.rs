//! Pull request model and request/response payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pull request status. MERGED is terminal: once a pull request is merged it
/// never transitions back to OPEN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pr_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PrStatus {
    #[default]
    Open,
    Merged,
}

/// Pull request entity with its current reviewer set.
///
/// The reviewer set never contains the author and never contains duplicates.
/// It holds 0, 1, or 2 reviewers at creation and afterwards changes only by
/// 1-for-1 substitution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
    pub assigned_reviewers: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

/// Abbreviated pull request view used by the reviewer listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PullRequestShort {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
}

impl PullRequest {
    pub fn short(&self) -> PullRequestShort {
        PullRequestShort {
            pull_request_id: self.pull_request_id.clone(),
            pull_request_name: self.pull_request_name.clone(),
            author_id: self.author_id.clone(),
            status: self.status,
        }
    }
}

/// Request payload for PR creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

/// Response payload for PR creation
#[derive(Debug, Clone, Serialize)]
pub struct CreatePullRequestResponse {
    pub pr: PullRequest,
}

/// Request payload for merge
#[derive(Debug, Clone, Deserialize)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}

/// Response payload for merge
#[derive(Debug, Clone, Serialize)]
pub struct MergePullRequestResponse {
    pub pr: PullRequest,
}

/// Request payload for reviewer reassignment
#[derive(Debug, Clone, Deserialize)]
pub struct ReassignPullRequestRequest {
    pub pull_request_id: String,
    pub old_user_id: String,
}

/// Response payload for reviewer reassignment
#[derive(Debug, Clone, Serialize)]
pub struct ReassignPullRequestResponse {
    pub pr: PullRequest,
    pub replaced_by: String,
}
