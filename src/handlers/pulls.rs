//! Pull request handlers
//!
//! HTTP surface of the reviewer assignment engine.

use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::models::{
    CreatePullRequestRequest, CreatePullRequestResponse, MergePullRequestRequest,
    MergePullRequestResponse, ReassignPullRequestRequest, ReassignPullRequestResponse,
};
use crate::services::{PullRequestError, PullRequestService};
use crate::AppState;

/// POST /pullRequest/create
///
/// Create a pull request and auto-assign up to two active reviewers from the
/// author's team.
pub async fn create_pr(
    state: web::Data<AppState>,
    body: web::Json<CreatePullRequestRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let service = PullRequestService::new(state.db.clone());

    let pr = service
        .create(&req.pull_request_id, &req.pull_request_name, &req.author_id)
        .await
        .map_err(map_pr_error)?;

    Ok(HttpResponse::Created().json(CreatePullRequestResponse { pr }))
}

/// POST /pullRequest/merge
///
/// Mark a pull request MERGED. Safe to repeat; the merge timestamp is set
/// once.
pub async fn merge_pr(
    state: web::Data<AppState>,
    body: web::Json<MergePullRequestRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let service = PullRequestService::new(state.db.clone());

    let pr = service
        .merge(&req.pull_request_id)
        .await
        .map_err(map_pr_error)?;

    Ok(HttpResponse::Ok().json(MergePullRequestResponse { pr }))
}

/// POST /pullRequest/reassign
///
/// Replace one assigned reviewer with another active member of their team.
pub async fn reassign_pr(
    state: web::Data<AppState>,
    body: web::Json<ReassignPullRequestRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let service = PullRequestService::new(state.db.clone());

    let (pr, replaced_by) = service
        .reassign(&req.pull_request_id, &req.old_user_id)
        .await
        .map_err(map_pr_error)?;

    Ok(HttpResponse::Ok().json(ReassignPullRequestResponse { pr, replaced_by }))
}

/// Map pull request errors to application errors
fn map_pr_error(e: PullRequestError) -> AppError {
    match e {
        PullRequestError::PrNotFound(id) => {
            AppError::NotFound(format!("pull request not found: {id}"))
        }
        PullRequestError::UserNotFound(id) => AppError::NotFound(format!("user not found: {id}")),
        PullRequestError::TeamNotFound(name) => {
            AppError::NotFound(format!("team not found: {name}"))
        }
        PullRequestError::PrExists(_) => {
            AppError::PrExists("pull_request_id already exists".to_string())
        }
        PullRequestError::AlreadyMerged(_) => {
            AppError::PrMerged("cannot reassign on merged PR".to_string())
        }
        PullRequestError::NotAssigned(_) => {
            AppError::NotAssigned("reviewer is not assigned to this PR".to_string())
        }
        PullRequestError::NoCandidate => {
            AppError::NoCandidate("no active replacement candidate in the team".to_string())
        }
        PullRequestError::Validation(msg) => AppError::Validation(msg),
        PullRequestError::Database(e) => AppError::Internal(e.to_string()),
    }
}

pub fn configure_pull_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/pullRequest/create").route(web::post().to(create_pr)));
    cfg.service(web::resource("/pullRequest/merge").route(web::post().to(merge_pr)));
    cfg.service(web::resource("/pullRequest/reassign").route(web::post().to(reassign_pr)));
}
