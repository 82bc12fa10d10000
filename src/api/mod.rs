//! API module
//!
//! HTTP endpoints, extractors, envelopes and middleware.

pub mod extract;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use response::Envelope;
pub use routes::create_router;
pub use state::AppState;
