//! In-process document store
//!
//! Behaves like a single store account: databases hold containers, and
//! containers hold JSON documents keyed by `id`. Used by the `memory`
//! store target and by the test suites.

use crate::adapters::store::{ContainerInfo, DatabaseRef, DocumentStore};
use crate::domain::{Result, SummitError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryContainer {
    partition_key: String,
    items: HashMap<String, Value>,
}

#[derive(Debug, Default)]
struct MemoryDatabase {
    containers: HashMap<String, MemoryContainer>,
}

/// Shared in-process account
#[derive(Debug, Default)]
pub struct MemoryStore {
    account: String,
    databases: RwLock<HashMap<String, MemoryDatabase>>,
}

impl MemoryStore {
    /// Create an empty account
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            databases: RwLock::new(HashMap::new()),
        }
    }

    /// Names of the databases in the account
    pub fn database_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .databases
            .read()
            .map(|dbs| dbs.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Partition key path of an existing container
    pub fn container_partition_key(&self, database: &str, container: &str) -> Option<String> {
        let dbs = self.databases.read().ok()?;
        dbs.get(database)?
            .containers
            .get(container)
            .map(|c| c.partition_key.clone())
    }

    /// Number of containers in `database`
    pub fn container_count(&self, database: &str) -> usize {
        self.databases
            .read()
            .ok()
            .and_then(|dbs| dbs.get(database).map(|db| db.containers.len()))
            .unwrap_or(0)
    }

    /// Create a container directly, bypassing provisioning
    ///
    /// Creates the database too when needed. Existing containers are left
    /// untouched.
    pub fn seed_container(&self, database: &str, container: &str, partition_key: &str) {
        if let Ok(mut dbs) = self.databases.write() {
            dbs.entry(database.to_string())
                .or_default()
                .containers
                .entry(container.to_string())
                .or_insert_with(|| MemoryContainer {
                    partition_key: partition_key.to_string(),
                    items: HashMap::new(),
                });
        }
    }

    fn poisoned() -> SummitError {
        SummitError::Store("In-memory store lock poisoned".to_string())
    }

    fn with_container<T>(
        &self,
        database: &str,
        container: &str,
        f: impl FnOnce(&mut MemoryContainer) -> T,
    ) -> Result<T> {
        let mut dbs = self.databases.write().map_err(|_| Self::poisoned())?;
        let db = dbs
            .get_mut(database)
            .ok_or_else(|| SummitError::Store(format!("Database '{database}' does not exist")))?;
        let container_ref = db.containers.get_mut(container).ok_or_else(|| {
            SummitError::Store(format!(
                "Container '{container}' does not exist in database '{database}'"
            ))
        })?;
        Ok(f(container_ref))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn account(&self) -> &str {
        &self.account
    }

    async fn ensure_database(&self, name: &str) -> Result<DatabaseRef> {
        let mut dbs = self.databases.write().map_err(|_| Self::poisoned())?;
        let created = !dbs.contains_key(name);
        if created {
            dbs.insert(name.to_string(), MemoryDatabase::default());
            tracing::info!(database = %name, "Database created successfully");
        } else {
            tracing::debug!(database = %name, "Database already exists");
        }

        Ok(DatabaseRef {
            name: name.to_string(),
            created,
        })
    }

    async fn ensure_container(
        &self,
        database: &DatabaseRef,
        name: &str,
        partition_key: &str,
    ) -> Result<ContainerInfo> {
        let mut dbs = self.databases.write().map_err(|_| Self::poisoned())?;
        let db = dbs.get_mut(&database.name).ok_or_else(|| {
            SummitError::Store(format!("Database '{}' does not exist", database.name))
        })?;

        let created = match db.containers.get(name) {
            Some(existing) => {
                if existing.partition_key != partition_key {
                    tracing::warn!(
                        container = %name,
                        existing = %existing.partition_key,
                        requested = %partition_key,
                        "Container exists with a different partition key; leaving it unchanged"
                    );
                }
                false
            }
            None => {
                db.containers.insert(
                    name.to_string(),
                    MemoryContainer {
                        partition_key: partition_key.to_string(),
                        items: HashMap::new(),
                    },
                );
                tracing::info!(container = %name, "Container created successfully");
                true
            }
        };

        Ok(ContainerInfo {
            name: name.to_string(),
            partition_key: partition_key.to_string(),
            created,
        })
    }

    async fn read_item(&self, database: &str, container: &str, id: &str) -> Result<Option<Value>> {
        self.with_container(database, container, |c| c.items.get(id).cloned())
    }

    async fn upsert_item(
        &self,
        database: &str,
        container: &str,
        id: &str,
        document: &Value,
    ) -> Result<()> {
        self.with_container(database, container, |c| {
            c.items.insert(id.to_string(), document.clone());
        })
    }

    async fn delete_item(&self, database: &str, container: &str, id: &str) -> Result<bool> {
        self.with_container(database, container, |c| c.items.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_ensure_database_is_idempotent() {
        let store = MemoryStore::new("memory://test");
        let first = store.ensure_database("db").await.unwrap();
        let second = store.ensure_database("db").await.unwrap();
        assert!(first.created);
        assert!(!second.created);
        assert_eq!(store.database_names(), vec!["db".to_string()]);
    }

    #[tokio::test]
    async fn test_existing_container_keeps_partition_key() {
        let store = MemoryStore::new("memory://test");
        store.seed_container("db", "Bookings", "/tenant");

        let db = store.ensure_database("db").await.unwrap();
        let info = store.ensure_container(&db, "Bookings", "/id").await.unwrap();

        assert!(!info.created);
        assert_eq!(
            store.container_partition_key("db", "Bookings").as_deref(),
            Some("/tenant")
        );
    }

    #[tokio::test]
    async fn test_item_operations() {
        let store = MemoryStore::new("memory://test");
        let db = store.ensure_database("db").await.unwrap();
        store.ensure_container(&db, "Projects", "/id").await.unwrap();

        let doc = json!({"id": "p-1", "name": "Summit"});
        store.upsert_item("db", "Projects", "p-1", &doc).await.unwrap();
        assert_eq!(
            store.read_item("db", "Projects", "p-1").await.unwrap(),
            Some(doc)
        );
        assert!(store.delete_item("db", "Projects", "p-1").await.unwrap());
        assert!(!store.delete_item("db", "Projects", "p-1").await.unwrap());
        assert_eq!(store.read_item("db", "Projects", "p-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_container_is_an_error() {
        let store = MemoryStore::new("memory://test");
        let result = store.read_item("db", "Nope", "x").await;
        assert!(matches!(result, Err(SummitError::Store(_))));
    }
}
