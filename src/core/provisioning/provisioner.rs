//! Idempotent database and container provisioning
//!
//! For one resource kind: ensure the database, then ensure the container
//! partitioned on `/id`. Each attempt is bounded by a timeout; transient
//! failures are retried a limited number of times.

use super::report::ProvisionOutcome;
use crate::adapters::store::{ContainerInfo, DatabaseRef, DocumentStore};
use crate::config::StartupConfig;
use crate::domain::{ResourceDescriptor, StartupError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Provisions one resource kind's database and container
#[derive(Debug, Clone)]
pub struct Provisioner {
    timeout: Duration,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl Provisioner {
    pub fn new(timeout: Duration, retry_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            timeout,
            retry_attempts,
            retry_delay,
        }
    }

    pub fn from_config(config: &StartupConfig) -> Self {
        Self::new(
            Duration::from_secs(config.provision_timeout_seconds),
            config.retry_attempts,
            Duration::from_millis(config.retry_delay_ms),
        )
    }

    /// Provision `descriptor` on `store`
    ///
    /// Never returns early with an error; the outcome carries it.
    pub async fn provision(
        &self,
        store: Arc<dyn DocumentStore>,
        descriptor: &ResourceDescriptor,
    ) -> ProvisionOutcome {
        let start = Instant::now();
        let max_attempts = self.retry_attempts + 1;
        let mut attempts = 0;

        let result = loop {
            attempts += 1;
            match self.attempt(store.as_ref(), descriptor).await {
                Ok(done) => break Ok(done),
                Err(e) if e.is_transient() && attempts < max_attempts => {
                    crate::log_retry_attempt!(attempts + 1, max_attempts, e);
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => break Err(e),
            }
        };

        let (database_created, container_created, error) = match result {
            Ok((database, container)) => (database.created, container.created, None),
            Err(e) => (false, false, Some(e)),
        };

        ProvisionOutcome {
            kind: descriptor.kind,
            database_name: descriptor.database_name.clone(),
            container_name: descriptor.container_name.clone(),
            database_created,
            container_created,
            attempts,
            duration: start.elapsed(),
            error,
        }
    }

    async fn attempt(
        &self,
        store: &dyn DocumentStore,
        descriptor: &ResourceDescriptor,
    ) -> Result<(DatabaseRef, ContainerInfo), StartupError> {
        let kind = descriptor.kind;

        let ensure = async {
            let database = store.ensure_database(&descriptor.database_name).await?;
            let container = store
                .ensure_container(
                    &database,
                    &descriptor.container_name,
                    descriptor.partition_key(),
                )
                .await?;
            Ok::<_, crate::domain::SummitError>((database, container))
        };

        match tokio::time::timeout(self.timeout, ensure).await {
            Ok(Ok(done)) => Ok(done),
            Ok(Err(e)) => Err(StartupError::from_store_error(kind, &e)),
            Err(_) => Err(StartupError::TimedOut {
                kind,
                seconds: self.timeout.as_secs(),
            }),
        }
    }
}

impl Default for Provisioner {
    fn default() -> Self {
        Self::from_config(&StartupConfig::default())
    }
}
