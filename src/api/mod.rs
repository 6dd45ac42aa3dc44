//! HTTP boundary over the assistant service.

pub mod routes;

pub use routes::{ApiError, AppState, api_routes};
