//! Startup orchestration
//!
//! - [`StartupCoordinator`] - Resolve, connect, provision, register
//! - [`Readiness`] - Readiness flag shared with the HTTP layer

pub mod coordinator;
pub mod readiness;

pub use coordinator::StartupCoordinator;
pub use readiness::Readiness;
