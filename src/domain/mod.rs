//! Domain module
//!
//! Core entity types, request context and input sanitization.

pub mod context;
pub mod sanitize;
pub mod user;

pub use context::RequestContext;
pub use sanitize::sanitize_input;
pub use user::{User, UserFields, UserId, UserRequest};
