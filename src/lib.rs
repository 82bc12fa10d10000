//! user_registry Library
//!
//! Re-exports modules for integration testing and the server binary.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod domain;
pub mod repository;
pub mod service;

mod error;

pub use config::Config;
pub use domain::{RequestContext, User, UserId, UserRequest};
pub use error::{status_text, AppError, AppResult, ErrorKind, ErrorResponse, HttpError};
