pub mod pulls;
pub mod stats;
pub mod teams;
pub mod users;

#[cfg(test)]
mod pr_http_tests;

pub use pulls::configure_pull_routes;
pub use stats::configure_stats_routes;
pub use teams::configure_team_routes;
pub use users::configure_user_routes;
