use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

/// Application-level error type
///
/// One variant per error kind the HTTP surface distinguishes. Handlers map
/// service-level errors into these; the [`ResponseError`] impl turns each kind
/// into exactly one status code and a JSON envelope.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing input, always the caller's fault
    Validation(String),
    /// Referenced entity absent
    NotFound(String),
    /// Team name already taken
    TeamExists(String),
    /// Pull request ID already taken
    PrExists(String),
    /// Mutation attempted on a merged (terminal) pull request
    PrMerged(String),
    /// Reviewer was not assigned to the pull request at commit time
    NotAssigned(String),
    /// No eligible replacement reviewer in the team
    NoCandidate(String),
    /// Storage or other internal failure, detail logged but not exposed
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::TeamExists(_) => "TEAM_EXISTS",
            Self::PrExists(_) => "PR_EXISTS",
            Self::PrMerged(_) => "PR_MERGED",
            Self::NotAssigned(_) => "NOT_ASSIGNED",
            Self::NoCandidate(_) => "NO_CANDIDATE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn message(&self) -> String {
        match self {
            // Internal detail goes to the log, not to the caller.
            Self::Internal(_) => "internal error".to_string(),
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::TeamExists(msg)
            | Self::PrMerged(msg)
            | Self::PrExists(msg)
            | Self::NotAssigned(msg)
            | Self::NoCandidate(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::TeamExists(msg) => write!(f, "Team exists: {msg}"),
            Self::PrExists(msg) => write!(f, "Pull request exists: {msg}"),
            Self::PrMerged(msg) => write!(f, "Pull request merged: {msg}"),
            Self::NotAssigned(msg) => write!(f, "Not assigned: {msg}"),
            Self::NoCandidate(msg) => write!(f, "No candidate: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if let Self::Internal(detail) = self {
            tracing::error!(%detail, "internal error");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code().to_string(),
                message: self.message(),
            },
        };

        match self {
            Self::Validation(_) => HttpResponse::BadRequest().json(body),
            Self::NotFound(_) => HttpResponse::NotFound().json(body),
            Self::TeamExists(_)
            | Self::PrExists(_)
            | Self::PrMerged(_)
            | Self::NotAssigned(_)
            | Self::NoCandidate(_) => HttpResponse::Conflict().json(body),
            Self::Internal(_) => HttpResponse::InternalServerError().json(body),
        }
    }
}
