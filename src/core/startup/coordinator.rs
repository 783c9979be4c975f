//! Startup coordinator - orchestrates the bootstrap before serving
//!
//! Configuration resolution, client construction, provisioning and service
//! registration run in that order. Any failure aborts startup as a whole:
//! a [`ServiceRegistry`] is only produced when every resource kind was
//! provisioned.

use crate::adapters::store::{DocumentStore, StoreConnector};
use crate::config::{CosmosDbSection, StoreTarget, SummitConfig};
use crate::core::provisioning::{Provisioner, StartupReport};
use crate::domain::{ResourceDescriptor, Result, StartupError, SummitError};
use crate::services::{ResourceService, ServiceHandle, ServiceRegistry};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;

/// Startup coordinator
pub struct StartupCoordinator {
    cosmos: CosmosDbSection,
    target: StoreTarget,
    connector: Arc<dyn StoreConnector>,
    provisioner: Provisioner,
}

impl StartupCoordinator {
    /// Create a coordinator for `config` using `connector` to build clients
    pub fn new(config: &SummitConfig, connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            cosmos: config.cosmos_db.clone(),
            target: config.store.target,
            connector,
            provisioner: Provisioner::from_config(&config.startup),
        }
    }

    /// Replace the provisioner (timeouts and retry policy)
    pub fn with_provisioner(mut self, provisioner: Provisioner) -> Self {
        self.provisioner = provisioner;
        self
    }

    /// Run startup
    ///
    /// 1. Resolves descriptors for every kind; any missing value fails
    ///    before a client is constructed
    /// 2. Constructs one store client per kind
    /// 3. Provisions all kinds concurrently and waits for all of them
    /// 4. Registers one service per kind
    ///
    /// # Errors
    ///
    /// Returns [`SummitError::StartupFailed`] listing every kind that
    /// failed.
    pub async fn run(&self) -> Result<(ServiceRegistry, StartupReport)> {
        let start_time = Instant::now();
        tracing::info!(target_store = ?self.target, "Starting bootstrap");

        let descriptors = self.resolve()?;
        let stores = self.connect(&descriptors)?;

        let provisioning = descriptors
            .iter()
            .zip(stores.iter())
            .map(|(descriptor, store)| self.provisioner.provision(Arc::clone(store), descriptor));
        let outcomes = join_all(provisioning).await;

        let mut report = StartupReport::new();
        for outcome in outcomes {
            report.add_outcome(outcome);
        }
        let report = report.with_duration(start_time.elapsed());
        report.log_summary();

        if !report.is_successful() {
            return Err(SummitError::StartupFailed {
                failures: report.failures(),
            });
        }

        let services: Vec<Arc<dyn ResourceService>> = descriptors
            .into_iter()
            .zip(stores)
            .map(|(descriptor, store)| {
                Arc::new(ServiceHandle::new(
                    descriptor.kind,
                    store,
                    descriptor.database_name,
                    descriptor.container_name,
                )) as Arc<dyn ResourceService>
            })
            .collect();

        let registry = ServiceRegistry::from_services(services).ok_or_else(|| {
            SummitError::Store("Service registry is missing a resource kind".to_string())
        })?;

        tracing::info!(
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Services registered"
        );

        Ok((registry, report))
    }

    /// Provision every kind without registering services
    ///
    /// # Errors
    ///
    /// Same as [`StartupCoordinator::run`].
    pub async fn provision_only(&self) -> Result<StartupReport> {
        self.run().await.map(|(_, report)| report)
    }

    fn resolve(&self) -> Result<Vec<ResourceDescriptor>> {
        self.cosmos.resolve_all(self.target).map_err(|failures| {
            for failure in &failures {
                tracing::error!(kind = %failure.kind(), error = %failure, "Configuration missing");
            }
            SummitError::StartupFailed { failures }
        })
    }

    fn connect(&self, descriptors: &[ResourceDescriptor]) -> Result<Vec<Arc<dyn DocumentStore>>> {
        let mut stores = Vec::with_capacity(descriptors.len());
        let mut failures = Vec::new();

        for descriptor in descriptors {
            match self.connector.connect(descriptor) {
                Ok(store) => stores.push(store),
                Err(e) => {
                    tracing::error!(kind = %descriptor.kind, error = %e, "Failed to construct store client");
                    failures.push(StartupError::CreateFailed {
                        kind: descriptor.kind,
                        message: format!("client construction failed: {e}"),
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(stores)
        } else {
            Err(SummitError::StartupFailed { failures })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryConnector;
    use crate::domain::ResourceKind;

    fn memory_config() -> SummitConfig {
        let mut config = SummitConfig::default();
        config.store.target = StoreTarget::Memory;
        config.cosmos_db.database_name = Some("BizzSummit".to_string());
        config.cosmos_db.bookings_container = Some("Bookings".to_string());
        config.cosmos_db.projects_container = Some("Projects".to_string());
        config.cosmos_db.resources_container = Some("Resources".to_string());
        config
    }

    #[tokio::test]
    async fn test_run_registers_every_kind() {
        let connector = MemoryConnector::new();
        let store = connector.store();
        let coordinator = StartupCoordinator::new(&memory_config(), Arc::new(connector));

        let (registry, report) = coordinator.run().await.unwrap();

        assert!(report.is_successful());
        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(store.container_count("BizzSummit"), 3);
        for kind in ResourceKind::ALL {
            assert_eq!(registry.get(kind).kind(), kind);
        }
    }

    #[tokio::test]
    async fn test_missing_container_names_fail_together() {
        let mut config = memory_config();
        config.cosmos_db.bookings_container = None;
        config.cosmos_db.resources_container = Some("  ".to_string());

        let coordinator = StartupCoordinator::new(&config, Arc::new(MemoryConnector::new()));
        let err = coordinator.run().await.unwrap_err();

        let SummitError::StartupFailed { failures } = err else {
            panic!("expected StartupFailed");
        };
        assert_eq!(failures.len(), 2);
        assert!(failures.iter().all(|f| matches!(f, StartupError::ConfigMissing { .. })));
    }
}
