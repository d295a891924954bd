//! Team handlers

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Team, TeamAddResponse};
use crate::services::{TeamError, TeamService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GetTeamQuery {
    #[serde(default)]
    pub team_name: String,
}

/// POST /team/add
///
/// Create a team with its members. Existing users are updated and rebound to
/// the new team.
pub async fn add_team(
    state: web::Data<AppState>,
    body: web::Json<Team>,
) -> Result<HttpResponse, AppError> {
    let service = TeamService::new(state.db.clone());

    let team = service.add(&body.into_inner()).await.map_err(map_team_error)?;

    Ok(HttpResponse::Created().json(TeamAddResponse { team }))
}

/// GET /team/get?team_name=
pub async fn get_team(
    state: web::Data<AppState>,
    query: web::Query<GetTeamQuery>,
) -> Result<HttpResponse, AppError> {
    let service = TeamService::new(state.db.clone());

    let team = service.get(&query.team_name).await.map_err(map_team_error)?;

    Ok(HttpResponse::Ok().json(team))
}

/// Map team errors to application errors
fn map_team_error(e: TeamError) -> AppError {
    match e {
        TeamError::NotFound(name) => AppError::NotFound(format!("team not found: {name}")),
        TeamError::AlreadyExists(_) => {
            AppError::TeamExists("team_name already exists".to_string())
        }
        TeamError::Validation(msg) => AppError::Validation(msg),
        TeamError::Database(e) => AppError::Internal(e.to_string()),
    }
}

pub fn configure_team_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/team/add").route(web::post().to(add_team)));
    cfg.service(web::resource("/team/get").route(web::get().to(get_team)));
}
