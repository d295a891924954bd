//! Reviewer statistics handler

use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::models::ReviewerStatsResponse;
use crate::services::{StatsError, StatsService};
use crate::AppState;

/// GET /stats/reviewers
///
/// Per-user reviewer assignment counts, busiest first.
pub async fn reviewer_stats(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let service = StatsService::new(state.db.clone());

    let items = service.reviewer_stats().await.map_err(|e| match e {
        StatsError::Database(e) => AppError::Internal(e.to_string()),
    })?;

    Ok(HttpResponse::Ok().json(ReviewerStatsResponse { items }))
}

pub fn configure_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/stats/reviewers").route(web::get().to(reviewer_stats)));
}
