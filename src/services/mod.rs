pub mod pull_request;
pub mod selector;
pub mod stats;
pub mod team;
pub mod user;


pub use pull_request::{PullRequestError, PullRequestService};
pub use stats::{StatsError, StatsService};
pub use team::{TeamError, TeamService};
pub use user::{UserError, UserService};
