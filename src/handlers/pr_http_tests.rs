//! HTTP integration tests for the reviewer assignment endpoints.
//!
//! These spin up the actix app against a real database and skip themselves
//! when `DATABASE_URL` is not reachable.

#[cfg(test)]
mod http_integration_tests {
    use actix_web::{test, web, App};
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::handlers::{
        configure_pull_routes, configure_stats_routes, configure_team_routes,
        configure_user_routes,
    };
    use crate::{AppState, Config};

    /// Helper to create a test database pool - returns None if connection fails
    async fn try_create_test_pool() -> Option<PgPool> {
        let _ = dotenvy::dotenv();

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => return None,
        };

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await
            .ok()?;

        sqlx::migrate!("./migrations").run(&pool).await.ok()?;

        Some(pool)
    }

    fn test_state(pool: PgPool) -> web::Data<AppState> {
        web::Data::new(AppState {
            db: pool,
            config: Config {
                database_url: String::new(),
                database_max_connections: 5,
                database_connect_attempts: 1,
                host: "127.0.0.1".to_string(),
                port: 0,
            },
        })
    }

    macro_rules! init_app {
        ($pool:expr) => {
            test::init_service(
                App::new()
                    .app_data(test_state($pool))
                    .configure(configure_team_routes)
                    .configure(configure_user_routes)
                    .configure(configure_pull_routes)
                    .configure(configure_stats_routes),
            )
            .await
        };
    }

    /// Team payload with every listed member active.
    fn team_payload(team_name: &str, ids: &[String]) -> serde_json::Value {
        serde_json::json!({
            "team_name": team_name,
            "members": ids
                .iter()
                .map(|id| serde_json::json!({
                    "user_id": id,
                    "username": format!("user {id}"),
                    "is_active": true,
                }))
                .collect::<Vec<_>>(),
        })
    }

    #[actix_web::test]
    async fn full_lifecycle_create_reassign_merge() {
        let pool = match try_create_test_pool().await {
            Some(p) => p,
            None => {
                eprintln!("Skipping test: database not available");
                return;
            }
        };
        let app = init_app!(pool);

        let suffix = Uuid::new_v4().to_string();
        let team_name = format!("alpha-{suffix}");
        let ids: Vec<String> = ["a", "b", "c", "d"]
            .iter()
            .map(|u| format!("{u}-{suffix}"))
            .collect();

        // Create the team.
        let req = test::TestRequest::post()
            .uri("/team/add")
            .set_json(team_payload(&team_name, &ids))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        // Author A opens a PR; two reviewers out of {B, C, D}.
        let pr_id = format!("pr-{suffix}");
        let req = test::TestRequest::post()
            .uri("/pullRequest/create")
            .set_json(serde_json::json!({
                "pull_request_id": pr_id,
                "pull_request_name": "feature x",
                "author_id": ids[0],
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let reviewers: Vec<String> = body["pr"]["assigned_reviewers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        assert_eq!(reviewers.len(), 2);
        assert!(!reviewers.contains(&ids[0]));

        // Swap one reviewer; the replacement is the remaining teammate.
        let req = test::TestRequest::post()
            .uri("/pullRequest/reassign")
            .set_json(serde_json::json!({
                "pull_request_id": pr_id,
                "old_user_id": reviewers[0],
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let replaced_by = body["replaced_by"].as_str().unwrap().to_string();
        assert!(ids.contains(&replaced_by));
        assert_ne!(replaced_by, ids[0]);
        assert!(!reviewers.contains(&replaced_by));

        // Merge, then reassignment must be rejected with PR_MERGED.
        let req = test::TestRequest::post()
            .uri("/pullRequest/merge")
            .set_json(serde_json::json!({ "pull_request_id": pr_id }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::post()
            .uri("/pullRequest/reassign")
            .set_json(serde_json::json!({
                "pull_request_id": pr_id,
                "old_user_id": replaced_by,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "PR_MERGED");
    }

    #[actix_web::test]
    async fn duplicate_team_returns_team_exists() {
        let pool = match try_create_test_pool().await {
            Some(p) => p,
            None => {
                eprintln!("Skipping test: database not available");
                return;
            }
        };
        let app = init_app!(pool);

        let suffix = Uuid::new_v4().to_string();
        let team_name = format!("dup-{suffix}");
        let ids = vec![format!("u-{suffix}")];

        let req = test::TestRequest::post()
            .uri("/team/add")
            .set_json(team_payload(&team_name, &ids))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let req = test::TestRequest::post()
            .uri("/team/add")
            .set_json(team_payload(&team_name, &ids))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "TEAM_EXISTS");
    }

    #[actix_web::test]
    async fn validation_and_not_found_mappings() {
        let pool = match try_create_test_pool().await {
            Some(p) => p,
            None => {
                eprintln!("Skipping test: database not available");
                return;
            }
        };
        let app = init_app!(pool);

        // Empty id is the caller's fault.
        let req = test::TestRequest::post()
            .uri("/pullRequest/merge")
            .set_json(serde_json::json!({ "pull_request_id": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION");

        // Unknown PR maps to 404.
        let req = test::TestRequest::post()
            .uri("/pullRequest/merge")
            .set_json(serde_json::json!({ "pull_request_id": format!("pr-{}", Uuid::new_v4()) }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[actix_web::test]
    async fn reviewer_stats_orders_by_count_then_name() {
        let pool = match try_create_test_pool().await {
            Some(p) => p,
            None => {
                eprintln!("Skipping test: database not available");
                return;
            }
        };
        let app = init_app!(pool);

        let suffix = Uuid::new_v4().to_string();
        let team_name = format!("stats-{suffix}");
        let ids: Vec<String> = ["a", "b", "c"]
            .iter()
            .map(|u| format!("{u}-{suffix}"))
            .collect();

        let req = test::TestRequest::post()
            .uri("/team/add")
            .set_json(team_payload(&team_name, &ids))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let req = test::TestRequest::post()
            .uri("/pullRequest/create")
            .set_json(serde_json::json!({
                "pull_request_id": format!("pr-{suffix}"),
                "pull_request_name": "stats pr",
                "author_id": ids[0],
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let req = test::TestRequest::get().uri("/stats/reviewers").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let items = body["items"].as_array().unwrap();
        assert!(!items.is_empty());

        // Counts are non-increasing down the list.
        let counts: Vec<i64> = items
            .iter()
            .map(|i| i["assigned_count"].as_i64().unwrap())
            .collect();
        let mut sorted = counts.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(counts, sorted);

        // Both teammates of the author carry the new PR.
        for reviewer in &ids[1..] {
            let item = items
                .iter()
                .find(|i| i["user_id"] == *reviewer)
                .expect("reviewer present in stats");
            assert_eq!(item["assigned_count"], 1);
        }
    }

    #[actix_web::test]
    async fn get_review_lists_assignments_for_reviewer() {
        let pool = match try_create_test_pool().await {
            Some(p) => p,
            None => {
                eprintln!("Skipping test: database not available");
                return;
            }
        };
        let app = init_app!(pool);

        let suffix = Uuid::new_v4().to_string();
        let team_name = format!("review-{suffix}");
        let ids: Vec<String> = ["a", "b"].iter().map(|u| format!("{u}-{suffix}")).collect();

        let req = test::TestRequest::post()
            .uri("/team/add")
            .set_json(team_payload(&team_name, &ids))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let pr_id = format!("pr-{suffix}");
        let req = test::TestRequest::post()
            .uri("/pullRequest/create")
            .set_json(serde_json::json!({
                "pull_request_id": pr_id,
                "pull_request_name": "review me",
                "author_id": ids[0],
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        // With a two-person team the single teammate is always assigned.
        let req = test::TestRequest::get()
            .uri(&format!("/users/getReview?user_id={}", ids[1]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let prs = body["pull_requests"].as_array().unwrap();
        assert!(prs.iter().any(|p| p["pull_request_id"] == pr_id));
    }
}
