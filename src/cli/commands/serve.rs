//! Serve command implementation
//!
//! Runs the full bootstrap (resolve, connect, provision, register) and
//! only then binds the listener.

use super::{exit_code_for, INTERRUPTED_EXIT_CODE};
use crate::adapters::store::{create_store_connector, StoreConnector};
use crate::config::{load_config, SummitConfig};
use crate::core::startup::{Readiness, StartupCoordinator};
use crate::http::{bind, build_router, serve, AppState};
use crate::log_error_with_context;
use clap::Args;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Bind address, overriding `server.bind_addr`
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting BizzSummit API");

        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if let Some(bind_addr) = self.bind {
            config.server.bind_addr = bind_addr;
        }

        let connector = create_store_connector(config.store.target);
        run_server(&config, connector, shutdown_signal).await
    }
}

/// Bootstrap with `connector`, then serve until shutdown is requested
///
/// A shutdown requested while provisioning is still running abandons
/// startup without binding the listener.
pub async fn run_server(
    config: &SummitConfig,
    connector: Arc<dyn StoreConnector>,
    mut shutdown_signal: watch::Receiver<bool>,
) -> anyhow::Result<i32> {
    let coordinator = StartupCoordinator::new(config, connector);
    let started = tokio::select! {
        result = coordinator.run() => result,
        () = shutdown_requested(&mut shutdown_signal) => {
            tracing::warn!("Shutdown requested during startup, listener not bound");
            eprintln!("⚠️  Startup interrupted");
            return Ok(INTERRUPTED_EXIT_CODE);
        }
    };

    let (services, _report) = match started {
        Ok(started) => started,
        Err(e) => {
            log_error_with_context!(&e, "Startup aborted");
            eprintln!("❌ {e}");
            return Ok(exit_code_for(&e));
        }
    };

    if *shutdown_signal.borrow() {
        tracing::warn!("Shutdown requested before binding, listener not bound");
        return Ok(INTERRUPTED_EXIT_CODE);
    }

    let state = AppState::new(services, Readiness::new());
    let app = build_router(config, state.clone());

    let listener = match bind(config.server.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log_error_with_context!(&e, "Failed to bind listener");
            eprintln!("❌ {e}");
            return Ok(exit_code_for(&e));
        }
    };

    let shutdown = async move { shutdown_requested(&mut shutdown_signal).await };

    serve(listener, app, &state, shutdown).await?;
    Ok(0)
}

/// Resolves once shutdown is requested
///
/// Without a sender no signal can arrive, so a closed channel never resolves.
async fn shutdown_requested(shutdown_signal: &mut watch::Receiver<bool>) {
    let closed = shutdown_signal.wait_for(|requested| *requested).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::{ContainerInfo, DatabaseRef, DocumentStore};
    use crate::config::StoreTarget;
    use crate::domain::{ResourceDescriptor, Result};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    /// Store whose provisioning never completes
    struct StalledStore;

    #[async_trait]
    impl DocumentStore for StalledStore {
        fn account(&self) -> &str {
            "memory://stalled"
        }

        async fn ensure_database(&self, _name: &str) -> Result<DatabaseRef> {
            std::future::pending().await
        }

        async fn ensure_container(
            &self,
            _database: &DatabaseRef,
            _name: &str,
            _partition_key: &str,
        ) -> Result<ContainerInfo> {
            std::future::pending().await
        }

        async fn read_item(
            &self,
            _database: &str,
            _container: &str,
            _id: &str,
        ) -> Result<Option<Value>> {
            Ok(None)
        }

        async fn upsert_item(
            &self,
            _database: &str,
            _container: &str,
            _id: &str,
            _document: &Value,
        ) -> Result<()> {
            Ok(())
        }

        async fn delete_item(&self, _database: &str, _container: &str, _id: &str) -> Result<bool> {
            Ok(false)
        }
    }

    struct StalledConnector;

    impl StoreConnector for StalledConnector {
        fn connect(&self, _descriptor: &ResourceDescriptor) -> Result<Arc<dyn DocumentStore>> {
            Ok(Arc::new(StalledStore))
        }
    }

    fn memory_config() -> SummitConfig {
        let mut config = SummitConfig::default();
        config.store.target = StoreTarget::Memory;
        config.server.bind_addr = "127.0.0.1:0".parse().unwrap();
        config.cosmos_db.database_name = Some("BizzSummit".to_string());
        config.cosmos_db.bookings_container = Some("Bookings".to_string());
        config.cosmos_db.projects_container = Some("Projects".to_string());
        config.cosmos_db.resources_container = Some("Resources".to_string());
        config
    }

    #[tokio::test]
    async fn test_shutdown_during_provisioning_skips_binding() {
        let config = memory_config();
        let (tx, rx) = watch::channel(false);
        let server = tokio::spawn(async move {
            run_server(&config, Arc::new(StalledConnector), rx).await
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        let code = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("startup should stop once shutdown is requested")
            .unwrap()
            .unwrap();
        assert_eq!(code, INTERRUPTED_EXIT_CODE);
    }

    #[tokio::test]
    async fn test_shutdown_before_binding_is_honoured() {
        let (_tx, rx) = watch::channel(true);
        let code = run_server(
            &memory_config(),
            Arc::new(crate::adapters::memory::MemoryConnector::new()),
            rx,
        )
        .await
        .unwrap();
        assert_eq!(code, INTERRUPTED_EXIT_CODE);
    }

    #[tokio::test]
    async fn test_missing_config_exits_with_config_error() {
        let (_tx, rx) = watch::channel(false);
        let code = ServeArgs::default()
            .execute("does-not-exist.toml", rx)
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_missing_container_exits_before_binding() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[store]
target = "memory"

[CosmosDb]
DatabaseName = "BizzSummit"
BookingsContainer = "Bookings"
ProjectsContainer = "Projects"

[auth]
enabled = false
"#
        )
        .unwrap();

        let (_tx, rx) = watch::channel(false);
        let code = ServeArgs::default()
            .execute(file.path().to_str().unwrap(), rx)
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
