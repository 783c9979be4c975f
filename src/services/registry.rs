//! Explicit service registry
//!
//! Holds exactly one service per resource kind. A registry can only be
//! assembled from a complete set, so its existence implies that every
//! kind was provisioned.

use super::handle::ResourceService;
use crate::domain::ResourceKind;
use std::sync::Arc;

/// One service per resource kind
#[derive(Clone)]
pub struct ServiceRegistry {
    bookings: Arc<dyn ResourceService>,
    projects: Arc<dyn ResourceService>,
    resources: Arc<dyn ResourceService>,
}

impl ServiceRegistry {
    pub fn new(
        bookings: Arc<dyn ResourceService>,
        projects: Arc<dyn ResourceService>,
        resources: Arc<dyn ResourceService>,
    ) -> Self {
        Self {
            bookings,
            projects,
            resources,
        }
    }

    /// Build a registry from services in any order
    ///
    /// Returns `None` unless every kind is present exactly once.
    pub fn from_services(services: Vec<Arc<dyn ResourceService>>) -> Option<Self> {
        let mut bookings = None;
        let mut projects = None;
        let mut resources = None;

        for service in services {
            let slot = match service.kind() {
                ResourceKind::Bookings => &mut bookings,
                ResourceKind::Projects => &mut projects,
                ResourceKind::Resources => &mut resources,
            };
            if slot.replace(service).is_some() {
                return None;
            }
        }

        Some(Self::new(bookings?, projects?, resources?))
    }

    /// Service for `kind`
    pub fn get(&self, kind: ResourceKind) -> Arc<dyn ResourceService> {
        match kind {
            ResourceKind::Bookings => Arc::clone(&self.bookings),
            ResourceKind::Projects => Arc::clone(&self.projects),
            ResourceKind::Resources => Arc::clone(&self.resources),
        }
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("kinds", &ResourceKind::ALL)
            .finish()
    }
}
