//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod page;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use page::{Page, PageRequest};
pub use user::{Region, User, UserDetails, UserId};
