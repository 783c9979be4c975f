//! Shared application state

use crate::core::startup::Readiness;
use crate::services::ServiceRegistry;

/// State handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    /// One service per resource kind
    pub services: ServiceRegistry,

    /// Readiness flag, cleared when shutdown begins
    pub readiness: Readiness,
}

impl AppState {
    pub fn new(services: ServiceRegistry, readiness: Readiness) -> Self {
        Self {
            services,
            readiness,
        }
    }
}
