//! Domain Service module
//!
//! Business invariants on top of the repository contract.

mod user_service;

pub use user_service::{UserManager, UserService};

#[cfg(test)]
pub use user_service::MockUserService;
