//! Service layer - user use cases over a repository.

mod user_service;

pub use user_service::{UserManager, UserService};
