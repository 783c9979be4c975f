//! HTTP surface
//!
//! - [`server`] - Pipeline assembly, binding and graceful shutdown
//! - [`middleware`] - HTTPS redirect and API key authorization
//! - [`routes`] - Resource endpoints and health probes
//! - [`docs`] - OpenAPI document and explorer
//! - [`error`] - JSON error responses

pub mod docs;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use server::{bind, build_router, serve};
pub use state::AppState;
