//! Integration tests for the startup phase
//!
//! These tests verify that:
//! - Provisioning is idempotent and creates one `/id`-partitioned container per kind
//! - Existing containers are left untouched
//! - Missing configuration fails before any client is constructed
//! - Store failures abort startup with a per-kind error
//! - Transient failures are retried, credential failures are not
//! - Slow stores hit the provisioning timeout

use async_trait::async_trait;
use bizzsummit::adapters::memory::{MemoryConnector, MemoryStore};
use bizzsummit::adapters::store::{ContainerInfo, DatabaseRef, DocumentStore, StoreConnector};
use bizzsummit::cli::commands::exit_code_for;
use bizzsummit::config::{StoreTarget, SummitConfig};
use bizzsummit::core::provisioning::Provisioner;
use bizzsummit::core::startup::StartupCoordinator;
use bizzsummit::domain::{
    CosmosDbError, ResourceDescriptor, ResourceKind, Result, StartupError, SummitError,
    PARTITION_KEY_PATH,
};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const DATABASE: &str = "BizzSummit";

fn memory_config() -> SummitConfig {
    let mut config = SummitConfig::default();
    config.store.target = StoreTarget::Memory;
    config.cosmos_db.database_name = Some(DATABASE.to_string());
    config.cosmos_db.bookings_container = Some("Bookings".to_string());
    config.cosmos_db.projects_container = Some("Projects".to_string());
    config.cosmos_db.resources_container = Some("Resources".to_string());
    config
}

fn fast_provisioner(retry_attempts: u32) -> Provisioner {
    Provisioner::new(Duration::from_millis(200), retry_attempts, Duration::ZERO)
}

fn failures(err: SummitError) -> Vec<StartupError> {
    match err {
        SummitError::StartupFailed { failures } => failures,
        other => panic!("expected StartupFailed, got {other}"),
    }
}

/// How a [`ScriptedStore`] answers `ensure_database`
#[derive(Clone, Copy)]
enum Behaviour {
    Unreachable,
    Unauthorized,
    /// Unreachable for the first N calls, then healthy
    FlakyFor(usize),
    Hang,
}

/// Store that fails in a scripted way before delegating to memory
struct ScriptedStore {
    behaviour: Behaviour,
    calls: AtomicUsize,
    inner: MemoryStore,
}

impl ScriptedStore {
    fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
            inner: MemoryStore::new("https://scripted.documents.azure.com:443/"),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for ScriptedStore {
    fn account(&self) -> &str {
        self.inner.account()
    }

    async fn ensure_database(&self, name: &str) -> Result<DatabaseRef> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            Behaviour::Unreachable => Err(SummitError::CosmosDb(CosmosDbError::ConnectionFailed(
                "error sending request: connection refused".to_string(),
            ))),
            Behaviour::Unauthorized => Err(SummitError::CosmosDb(
                CosmosDbError::AuthenticationFailed("HttpResponse(Unauthorized)".to_string()),
            )),
            Behaviour::FlakyFor(n) if call < n => Err(SummitError::CosmosDb(
                CosmosDbError::ConnectionFailed("connection reset".to_string()),
            )),
            Behaviour::FlakyFor(_) => self.inner.ensure_database(name).await,
            Behaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                self.inner.ensure_database(name).await
            }
        }
    }

    async fn ensure_container(
        &self,
        database: &DatabaseRef,
        name: &str,
        partition_key: &str,
    ) -> Result<ContainerInfo> {
        self.inner.ensure_container(database, name, partition_key).await
    }

    async fn read_item(&self, database: &str, container: &str, id: &str) -> Result<Option<Value>> {
        self.inner.read_item(database, container, id).await
    }

    async fn upsert_item(
        &self,
        database: &str,
        container: &str,
        id: &str,
        document: &Value,
    ) -> Result<()> {
        self.inner.upsert_item(database, container, id, document).await
    }

    async fn delete_item(&self, database: &str, container: &str, id: &str) -> Result<bool> {
        self.inner.delete_item(database, container, id).await
    }
}

/// Connector handing out one shared store and counting connects
struct FixedConnector {
    store: Arc<dyn DocumentStore>,
    connects: AtomicUsize,
}

impl FixedConnector {
    fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            connects: AtomicUsize::new(0),
        }
    }
}

impl StoreConnector for FixedConnector {
    fn connect(&self, _descriptor: &ResourceDescriptor) -> Result<Arc<dyn DocumentStore>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.store))
    }
}

#[tokio::test]
async fn test_empty_store_gets_three_id_partitioned_containers() {
    let connector = MemoryConnector::new();
    let store = connector.store();

    let (_registry, report) = StartupCoordinator::new(&memory_config(), Arc::new(connector))
        .run()
        .await
        .unwrap();

    assert!(report.is_successful());
    assert_eq!(store.database_names(), vec![DATABASE.to_string()]);
    assert_eq!(store.container_count(DATABASE), 3);
    for kind in ResourceKind::ALL {
        assert_eq!(
            store
                .container_partition_key(DATABASE, kind.as_str())
                .as_deref(),
            Some(PARTITION_KEY_PATH)
        );
        assert!(report.outcome(kind).unwrap().container_created);
    }
}

#[tokio::test]
async fn test_provisioning_is_idempotent() {
    let connector = MemoryConnector::new();
    let store = connector.store();
    let coordinator = StartupCoordinator::new(&memory_config(), Arc::new(connector));

    coordinator.run().await.unwrap();
    let (_registry, second) = coordinator.run().await.unwrap();

    assert!(second.is_successful());
    assert_eq!(store.container_count(DATABASE), 3);
    for outcome in &second.outcomes {
        assert!(!outcome.database_created);
        assert!(!outcome.container_created);
        assert_eq!(outcome.attempts, 1);
    }
}

#[tokio::test]
async fn test_existing_container_is_not_altered() {
    let store = Arc::new(MemoryStore::new("memory://local"));
    store.seed_container(DATABASE, "Projects", "/tenantId");
    let connector = MemoryConnector::with_store(store.clone());

    let (_registry, report) = StartupCoordinator::new(&memory_config(), Arc::new(connector))
        .run()
        .await
        .unwrap();

    assert!(report.is_successful());
    assert!(!report.outcome(ResourceKind::Projects).unwrap().container_created);
    assert_eq!(
        store.container_partition_key(DATABASE, "Projects").as_deref(),
        Some("/tenantId")
    );
    assert_eq!(store.container_count(DATABASE), 3);
}

#[tokio::test]
async fn test_missing_configuration_fails_before_any_client_is_built() {
    let mut config = memory_config();
    config.cosmos_db.projects_container = Some(String::new());

    let connector = Arc::new(FixedConnector::new(Arc::new(MemoryStore::new("memory://local"))));
    let err = StartupCoordinator::new(&config, connector.clone())
        .run()
        .await
        .unwrap_err();

    assert_eq!(connector.connects.load(Ordering::SeqCst), 0);
    assert_eq!(exit_code_for(&err), 2);
    assert_eq!(
        failures(err),
        vec![StartupError::ConfigMissing {
            kind: ResourceKind::Projects,
            key: "ProjectsContainer",
        }]
    );
}

#[tokio::test]
async fn test_unreachable_store_aborts_with_network_error() {
    let store = Arc::new(ScriptedStore::new(Behaviour::Unreachable));
    let connector = Arc::new(FixedConnector::new(store.clone()));

    let err = StartupCoordinator::new(&memory_config(), connector)
        .with_provisioner(fast_provisioner(0))
        .run()
        .await
        .unwrap_err();

    assert_eq!(exit_code_for(&err), 4);
    let failures = failures(err);
    assert_eq!(failures.len(), 3);
    assert!(failures
        .iter()
        .all(|f| matches!(f, StartupError::NetworkUnreachable { .. })));
    let mut kinds: Vec<ResourceKind> = failures.iter().map(StartupError::kind).collect();
    kinds.sort();
    assert_eq!(kinds, ResourceKind::ALL.to_vec());
}

#[tokio::test]
async fn test_transient_failure_is_retried_once() {
    let store = Arc::new(ScriptedStore::new(Behaviour::FlakyFor(1)));
    let descriptor = memory_config()
        .cosmos_db
        .resolve(ResourceKind::Bookings, StoreTarget::Memory)
        .unwrap();

    let outcome = fast_provisioner(1).provision(store.clone(), &descriptor).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.attempts, 2);
    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let store = Arc::new(ScriptedStore::new(Behaviour::Unreachable));
    let descriptor = memory_config()
        .cosmos_db
        .resolve(ResourceKind::Resources, StoreTarget::Memory)
        .unwrap();

    let outcome = fast_provisioner(1).provision(store.clone(), &descriptor).await;

    assert!(matches!(
        outcome.error,
        Some(StartupError::NetworkUnreachable { .. })
    ));
    assert_eq!(outcome.attempts, 2);
    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn test_auth_failure_is_not_retried() {
    let store = Arc::new(ScriptedStore::new(Behaviour::Unauthorized));
    let descriptor = memory_config()
        .cosmos_db
        .resolve(ResourceKind::Projects, StoreTarget::Memory)
        .unwrap();

    let outcome = fast_provisioner(3).provision(store.clone(), &descriptor).await;

    assert!(matches!(
        outcome.error,
        Some(StartupError::AuthFailed {
            kind: ResourceKind::Projects,
            ..
        })
    ));
    assert_eq!(outcome.attempts, 1);
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn test_slow_store_times_out() {
    let store = Arc::new(ScriptedStore::new(Behaviour::Hang));
    let connector = Arc::new(FixedConnector::new(store));

    let err = StartupCoordinator::new(&memory_config(), connector)
        .with_provisioner(fast_provisioner(0))
        .run()
        .await
        .unwrap_err();

    assert_eq!(exit_code_for(&err), 3);
    assert!(failures(err)
        .iter()
        .all(|f| matches!(f, StartupError::TimedOut { .. })));
}

#[tokio::test]
async fn test_registered_services_reach_their_containers() {
    let connector = MemoryConnector::new();
    let (registry, _report) = StartupCoordinator::new(&memory_config(), Arc::new(connector))
        .run()
        .await
        .unwrap();

    let document = bizzsummit::domain::Document::from_value(serde_json::json!({
        "id": "r-1",
        "name": "Projector"
    }))
    .unwrap();

    let resources = registry.get(ResourceKind::Resources);
    resources.upsert(document.clone()).await.unwrap();

    assert_eq!(resources.get("r-1").await.unwrap(), Some(document));
    assert_eq!(registry.get(ResourceKind::Bookings).get("r-1").await.unwrap(), None);
}
