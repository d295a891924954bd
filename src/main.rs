use std::time::Duration;

use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pr_reviewer_service::handlers::{
    configure_pull_routes, configure_stats_routes, configure_team_routes, configure_user_routes,
};
use pr_reviewer_service::{AppState, Config};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "pr-reviewer-service"
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pr_reviewer_service=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    info!("Starting server on {}:{}", config.host, config.port);

    let db_pool = connect_with_retry(&config)
        .await
        .expect("Failed to create database pool");

    info!("Database connection pool established");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    info!("Database migrations completed");

    let app_state = web::Data::new(AppState {
        db: db_pool,
        config: config.clone(),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(health_check))
            .configure(configure_team_routes)
            .configure(configure_user_routes)
            .configure(configure_pull_routes)
            .configure(configure_stats_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

/// Connect to the database, retrying for a while so the service survives the
/// database coming up after it (e.g. under docker-compose).
async fn connect_with_retry(config: &Config) -> Result<PgPool, sqlx::Error> {
    let mut last_err = None;

    for attempt in 1..=config.database_connect_attempts {
        match PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                warn!(attempt, error = %e, "database not ready");
                last_err = Some(e);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }

    Err(last_err.expect("at least one connection attempt"))
}
