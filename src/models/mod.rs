pub mod pull_request;
pub mod user;

pub use pull_request::*;
pub use user::*;
