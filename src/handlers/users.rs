//! User handlers

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{PullRequestShort, SetIsActiveRequest, SetIsActiveResponse};
use crate::services::{UserError, UserService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GetReviewQuery {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct GetReviewResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShort>,
}

/// POST /users/setIsActive
pub async fn set_is_active(
    state: web::Data<AppState>,
    body: web::Json<SetIsActiveRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let service = UserService::new(state.db.clone());

    let user = service
        .set_is_active(&req.user_id, req.is_active)
        .await
        .map_err(map_user_error)?;

    Ok(HttpResponse::Ok().json(SetIsActiveResponse { user }))
}

/// GET /users/getReview?user_id=
///
/// Pull requests where the user is an assigned reviewer.
pub async fn get_review(
    state: web::Data<AppState>,
    query: web::Query<GetReviewQuery>,
) -> Result<HttpResponse, AppError> {
    let service = UserService::new(state.db.clone());

    let prs = service
        .get_review(&query.user_id)
        .await
        .map_err(map_user_error)?;

    Ok(HttpResponse::Ok().json(GetReviewResponse {
        user_id: query.into_inner().user_id,
        pull_requests: prs.iter().map(|pr| pr.short()).collect(),
    }))
}

/// Map user errors to application errors
fn map_user_error(e: UserError) -> AppError {
    match e {
        UserError::NotFound(id) => AppError::NotFound(format!("user not found: {id}")),
        UserError::Validation(msg) => AppError::Validation(msg),
        UserError::Database(e) => AppError::Internal(e.to_string()),
    }
}

pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/users/setIsActive").route(web::post().to(set_is_active)));
    cfg.service(web::resource("/users/getReview").route(web::get().to(get_review)));
}
